//! Domain layer error definitions.

use std::time::Duration;

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// SessionId validation error
    #[error("SessionId cannot be empty")]
    SessionIdEmpty,

    /// UserId validation error
    #[error("User id cannot be empty")]
    UserIdEmpty,

    /// UserId too long error
    #[error("User id cannot exceed {max} characters (got {actual})")]
    UserIdTooLong { max: usize, actual: usize },

    /// DisplayName validation error
    #[error("Name cannot be empty")]
    DisplayNameEmpty,

    /// DisplayName too long error
    #[error("Name cannot exceed {max} characters (got {actual})")]
    DisplayNameTooLong { max: usize, actual: usize },

    /// Credential validation error
    #[error("API key cannot be empty")]
    CredentialEmpty,

    /// MessageId validation error
    #[error("MessageId cannot be empty")]
    MessageIdEmpty,

    /// MessageContent validation error
    #[error("Message cannot be empty")]
    MessageContentEmpty,

    /// MessageContent too long error
    #[error("Message cannot exceed {max} characters (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },

    /// RoomName validation error
    #[error("Room name cannot be empty")]
    RoomNameEmpty,

    /// RoomName too long error
    #[error("Room name cannot exceed {max} characters (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },
}

/// Errors related to the presence table
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PresenceError {
    /// The session already has a user bound to it
    #[error("Session '{0}' already has a bound user")]
    AlreadyBound(String),
}

/// Errors raised by message log repositories
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A message with the same id has already been appended
    #[error("Message '{0}' has already been recorded")]
    DuplicateMessage(String),

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors raised while talking to the completion service
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// The request could not be delivered or the response could not be read
    #[error("completion request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("completion service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The service answered without any choice
    #[error("completion service returned no choices")]
    EmptyResponse,

    /// No answer within the configured bound
    #[error("completion request timed out after {0:?}")]
    Timeout(Duration),
}
