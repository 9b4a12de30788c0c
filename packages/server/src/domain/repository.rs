//! Repository trait definitions.
//!
//! The room coordinator depends on these traits only; concrete storage lives
//! in the infrastructure layer.

use async_trait::async_trait;

use super::{entity::Message, error::RepositoryError};

/// Append-only message log.
///
/// Each message is appended at most once; implementations reject a second
/// append of the same id with [`RepositoryError::DuplicateMessage`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageLogRepository: Send + Sync {
    /// Append a message to the log.
    async fn append(&self, message: &Message) -> Result<(), RepositoryError>;
}
