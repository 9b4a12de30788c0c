//! Persist-then-broadcast path shared by user and assistant messages.

use std::sync::Arc;

use crate::{
    domain::{Message, MessageLogRepository},
    infrastructure::dto::websocket::{MessageDto, ServerEvent},
};

use super::registry::ConnectionRegistry;

/// Appends a message to the log and fans it out to the room
#[derive(Clone)]
pub struct MessagePublisher {
    registry: Arc<ConnectionRegistry>,
    message_log: Arc<dyn MessageLogRepository>,
}

impl MessagePublisher {
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        message_log: Arc<dyn MessageLogRepository>,
    ) -> Self {
        Self {
            registry,
            message_log,
        }
    }

    /// Persist `message` once, then broadcast it.
    ///
    /// A persistence failure is logged and the broadcast still happens.
    /// Neither call runs under a room lock other than the registry's own
    /// broadcast lock.
    ///
    /// Returns the number of sessions the message was handed to.
    pub async fn publish(&self, message: &Message) -> usize {
        if let Err(e) = self.message_log.append(message).await {
            tracing::error!("Failed to persist message '{}': {}", message.id, e);
        }

        let delivered = self
            .registry
            .broadcast(&ServerEvent::Message(MessageDto::from(message)))
            .await;
        tracing::debug!(
            "Broadcasted {} message '{}' to {} session(s)",
            message.kind.as_str(),
            message.id,
            delivered
        );
        delivered
    }
}
