//! Connection Registry: live transports keyed by session id.

use std::collections::HashMap;

use tokio::sync::{Mutex, mpsc};

use crate::{domain::SessionId, infrastructure::dto::websocket::ServerEvent};

/// Outbound half of a session's transport.
///
/// The connection's send task drains the receiving end into the socket.
pub type Transport = mpsc::UnboundedSender<String>;

/// Live transports of one room
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: Mutex<HashMap<SessionId, Transport>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transport. Replaces any transport under the same id.
    pub async fn register(&self, session_id: SessionId, transport: Transport) {
        let mut connections = self.connections.lock().await;
        connections.insert(session_id, transport);
    }

    /// Remove a transport. Returns whether an entry existed.
    pub async fn unregister(&self, session_id: &SessionId) -> bool {
        let mut connections = self.connections.lock().await;
        connections.remove(session_id).is_some()
    }

    pub async fn contains(&self, session_id: &SessionId) -> bool {
        self.connections.lock().await.contains_key(session_id)
    }

    pub async fn len(&self) -> usize {
        self.connections.lock().await.len()
    }

    /// Send `event` to every registered transport.
    ///
    /// The lock is held from snapshot to the last send, so broadcasts are
    /// serialized: every recipient observes broadcasts in the same order.
    /// Sends never block. A failed send is logged and skipped.
    ///
    /// Returns the number of transports the event was handed to.
    pub async fn broadcast(&self, event: &ServerEvent) -> usize {
        let payload = match serde_json::to_string(event) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to serialize broadcast event: {}", e);
                return 0;
            }
        };

        let connections = self.connections.lock().await;
        let mut delivered = 0;
        for (session_id, transport) in connections.iter() {
            if transport.send(payload.clone()).is_err() {
                tracing::warn!("Failed to send broadcast to session '{}'", session_id);
                continue;
            }
            delivered += 1;
        }
        delivered
    }

    /// Send `event` to a single session.
    ///
    /// Returns `false` when the session is gone or its transport is closed.
    pub async fn send_to(&self, session_id: &SessionId, event: &ServerEvent) -> bool {
        let payload = match serde_json::to_string(event) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to serialize event for '{}': {}", session_id, e);
                return false;
            }
        };

        let connections = self.connections.lock().await;
        match connections.get(session_id) {
            Some(transport) => {
                if transport.send(payload).is_err() {
                    tracing::warn!("Failed to send event to session '{}'", session_id);
                    return false;
                }
                true
            }
            None => {
                tracing::debug!("Session '{}' is no longer registered", session_id);
                false
            }
        }
    }
}
