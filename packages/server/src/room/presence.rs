//! Presence Table: the user bound to each session.

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::domain::{PresenceError, SessionId, User};

/// Joined users of one room, keyed by session id
#[derive(Default)]
pub struct PresenceTable {
    users: Mutex<HashMap<SessionId, User>>,
}

impl PresenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `user` to the session.
    ///
    /// # Errors
    ///
    /// Returns `PresenceError::AlreadyBound` if the session already has a
    /// user; the existing binding is left untouched.
    pub async fn bind(&self, session_id: SessionId, user: User) -> Result<(), PresenceError> {
        let mut users = self.users.lock().await;
        if users.contains_key(&session_id) {
            return Err(PresenceError::AlreadyBound(session_id.to_string()));
        }
        users.insert(session_id, user);
        Ok(())
    }

    /// Remove and return the user bound to the session, if any.
    pub async fn unbind(&self, session_id: &SessionId) -> Option<User> {
        self.users.lock().await.remove(session_id)
    }

    pub async fn get(&self, session_id: &SessionId) -> Option<User> {
        self.users.lock().await.get(session_id).cloned()
    }

    /// Snapshot of joined users sorted by user id.
    pub async fn users(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.lock().await.values().cloned().collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        users
    }

}
