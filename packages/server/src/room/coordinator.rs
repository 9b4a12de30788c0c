//! Room Coordinator.
//!
//! Owns the connection registry and the presence table of one room and is
//! the only component that mutates them. Each session moves through
//! `Connected -> Joined -> Closed`:
//!
//! - `Connected`: registered, no presence entry. Only `join` is accepted.
//! - `Joined`: presence entry exists. `message` events are processed.
//! - `Closed`: unregistered and unbound; `user-left` is broadcast if the
//!   session had joined.
//!
//! Events of one session are handled in receipt order by the caller's
//! receive loop. Join and disconnect are serialized by a membership lock, so
//! a presence entry only ever exists for a registered session. Persistence
//! and completion calls never run while a room lock is held.

use std::{sync::Arc, time::Duration};

use huddle_shared::time::get_utc_timestamp;
use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{
        Command, CompletionService, Message, MessageContent, MessageIdFactory,
        MessageLogRepository, RoomName, SessionId, Timestamp, User,
    },
    infrastructure::dto::websocket::{ClientEvent, JoinPayload, PresenceDto, ServerEvent},
};

use super::{
    clock::MessageClock,
    error::RoomEventError,
    presence::PresenceTable,
    publisher::MessagePublisher,
    registry::{ConnectionRegistry, Transport},
    relay::{CompletionRelay, RelayWorker},
};

/// Coordinates one chat room
pub struct RoomCoordinator {
    name: RoomName,
    created_at: Timestamp,
    registry: Arc<ConnectionRegistry>,
    presence: PresenceTable,
    membership: Mutex<()>,
    publisher: MessagePublisher,
    clock: Arc<MessageClock>,
    relay: CompletionRelay,
}

impl RoomCoordinator {
    /// Create a room and start its relay worker.
    ///
    /// Must be called from within a Tokio runtime. The worker stops once the
    /// room and every in-flight relay task are gone.
    pub fn new(
        name: RoomName,
        message_log: Arc<dyn MessageLogRepository>,
        completion: Arc<dyn CompletionService>,
        relay_timeout: Duration,
    ) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let publisher = MessagePublisher::new(registry.clone(), message_log);
        let clock = Arc::new(MessageClock::new());

        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let worker = RelayWorker::new(registry.clone(), publisher.clone(), clock.clone());
        tokio::spawn(worker.run(outcome_rx));

        Self {
            name,
            created_at: Timestamp::new(get_utc_timestamp()),
            registry,
            presence: PresenceTable::new(),
            membership: Mutex::new(()),
            publisher,
            clock,
            relay: CompletionRelay::new(completion, relay_timeout, outcome_tx),
        }
    }

    pub fn name(&self) -> &RoomName {
        &self.name
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Register a freshly accepted connection. The session starts `Connected`.
    pub async fn connect(&self, session_id: SessionId, transport: Transport) {
        self.registry.register(session_id.clone(), transport).await;
        tracing::info!("Session '{}' connected to room '{}'", session_id, self.name);
    }

    /// Handle one validated client event.
    ///
    /// Failures are reported to the session as an `error` event before being
    /// returned; none of them changes room state.
    pub async fn handle_event(
        &self,
        session_id: &SessionId,
        event: ClientEvent,
    ) -> Result<(), RoomEventError> {
        let result = match event {
            ClientEvent::Join(payload) => self.join(session_id, payload).await,
            ClientEvent::Message(text) => self.send_message(session_id, text).await,
        };

        if let Err(e) = &result {
            self.reject(session_id, e).await;
        }
        result
    }

    /// Send an `error` event to one session.
    pub async fn reject(&self, session_id: &SessionId, error: &RoomEventError) {
        tracing::warn!("Rejected event from session '{}': {}", session_id, error);
        self.registry
            .send_to(session_id, &ServerEvent::Error(error.to_string()))
            .await;
    }

    /// Tear the session down. Safe to call more than once.
    pub async fn disconnect(&self, session_id: &SessionId) {
        let _membership = self.membership.lock().await;
        let user = self.presence.unbind(session_id).await;
        let was_registered = self.registry.unregister(session_id).await;

        match user {
            Some(user) => {
                self.registry
                    .broadcast(&ServerEvent::UserLeft(PresenceDto::from(&user)))
                    .await;
                tracing::info!(
                    "User '{}' left room '{}' (session '{}')",
                    user.id,
                    self.name,
                    session_id
                );
            }
            None if was_registered => {
                tracing::info!("Session '{}' closed before joining", session_id);
            }
            None => {}
        }
    }

    /// Joined users sorted by id.
    pub async fn participants(&self) -> Vec<User> {
        self.presence.users().await
    }

    /// Live connections, joined or not.
    pub async fn connection_count(&self) -> usize {
        self.registry.len().await
    }

    async fn join(&self, session_id: &SessionId, payload: JoinPayload) -> Result<(), RoomEventError> {
        let _membership = self.membership.lock().await;
        if !self.registry.contains(session_id).await {
            return Err(RoomEventError::UnknownSession);
        }
        if self.presence.get(session_id).await.is_some() {
            return Err(RoomEventError::AlreadyJoined);
        }

        let user = User::try_from(payload).map_err(RoomEventError::InvalidJoin)?;
        let presence = PresenceDto::from(&user);
        let user_id = user.id.clone();
        self.presence
            .bind(session_id.clone(), user)
            .await
            .map_err(|_| RoomEventError::AlreadyJoined)?;

        self.registry
            .broadcast(&ServerEvent::UserJoined(presence))
            .await;
        tracing::info!(
            "User '{}' joined room '{}' (session '{}')",
            user_id,
            self.name,
            session_id
        );
        Ok(())
    }

    async fn send_message(&self, session_id: &SessionId, text: String) -> Result<(), RoomEventError> {
        let user = self
            .presence
            .get(session_id)
            .await
            .ok_or(RoomEventError::NotJoined)?;
        let content = MessageContent::new(text).map_err(RoomEventError::InvalidMessage)?;

        let message = Message::from_user(
            MessageIdFactory::generate(),
            &user,
            content,
            self.clock.now(),
        );
        self.publisher.publish(&message).await;

        if let Some(Command::Ask { query }) = Command::parse(&message.content) {
            self.relay
                .dispatch(session_id.clone(), user.credential.clone(), query);
        }
        Ok(())
    }
}
