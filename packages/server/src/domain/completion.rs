//! Completion service abstraction.

use async_trait::async_trait;

use super::{error::CompletionError, value_object::Credential};

/// External text-completion service.
///
/// One round trip per call, authenticated with the calling user's own
/// credential.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Ask the service to complete `prompt`.
    async fn complete(&self, credential: &Credential, prompt: &str)
    -> Result<String, CompletionError>;
}
