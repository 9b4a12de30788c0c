//! Completion Relay.
//!
//! Each `/ask` command is handled by its own background task that calls the
//! completion service with the user's credential under a timeout. Outcomes
//! flow through a channel into a per-room worker, which publishes assistant
//! replies or reports failures to the originating session only.

use std::{sync::Arc, time::Duration};

use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{
        CompletionError, CompletionService, Credential, Message, MessageContent, MessageIdFactory,
        SessionId,
    },
    infrastructure::dto::websocket::ServerEvent,
};

use super::{clock::MessageClock, publisher::MessagePublisher, registry::ConnectionRegistry};

/// Default bound on a single completion call
pub const DEFAULT_RELAY_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of one completion call, addressed to the session that asked
#[derive(Debug)]
pub struct RelayOutcome {
    pub session_id: SessionId,
    pub result: Result<String, CompletionError>,
}

/// Spawns completion calls and reports their outcome to the relay worker
pub struct CompletionRelay {
    service: Arc<dyn CompletionService>,
    timeout: Duration,
    outcomes: mpsc::UnboundedSender<RelayOutcome>,
}

impl CompletionRelay {
    pub fn new(
        service: Arc<dyn CompletionService>,
        timeout: Duration,
        outcomes: mpsc::UnboundedSender<RelayOutcome>,
    ) -> Self {
        Self {
            service,
            timeout,
            outcomes,
        }
    }

    /// Start a completion call in the background.
    ///
    /// Returns immediately; the caller's next event is not held up.
    pub fn dispatch(
        &self,
        session_id: SessionId,
        credential: Credential,
        query: String,
    ) -> JoinHandle<()> {
        let service = self.service.clone();
        let timeout = self.timeout;
        let outcomes = self.outcomes.clone();

        tokio::spawn(async move {
            tracing::info!("Relaying completion request for session '{}'", session_id);
            let result =
                match tokio::time::timeout(timeout, service.complete(&credential, &query)).await {
                    Ok(result) => result,
                    Err(_) => Err(CompletionError::Timeout(timeout)),
                };

            if outcomes.send(RelayOutcome { session_id, result }).is_err() {
                tracing::debug!("Relay worker has stopped; dropping completion outcome");
            }
        })
    }
}

/// Consumes relay outcomes for one room
pub struct RelayWorker {
    registry: Arc<ConnectionRegistry>,
    publisher: MessagePublisher,
    clock: Arc<MessageClock>,
}

impl RelayWorker {
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        publisher: MessagePublisher,
        clock: Arc<MessageClock>,
    ) -> Self {
        Self {
            registry,
            publisher,
            clock,
        }
    }

    /// Process outcomes until every sender is dropped.
    pub async fn run(self, mut outcomes: mpsc::UnboundedReceiver<RelayOutcome>) {
        while let Some(outcome) = outcomes.recv().await {
            self.handle(outcome).await;
        }
        tracing::debug!("Relay worker stopped");
    }

    async fn handle(&self, outcome: RelayOutcome) {
        match outcome.result {
            Ok(text) => {
                let message = Message::from_assistant(
                    MessageIdFactory::generate(),
                    MessageContent::from_completion(text),
                    self.clock.now(),
                );
                self.publisher.publish(&message).await;
            }
            Err(e) => {
                tracing::warn!(
                    "Completion request for session '{}' failed: {}",
                    outcome.session_id,
                    e
                );
                let event = ServerEvent::Error(format!("Failed to process LLM request: {e}"));
                self.registry.send_to(&outcome.session_id, &event).await;
            }
        }
    }
}
