//! Domain layer for the chat application.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod command;
pub mod completion;
pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use command::{ASK_COMMAND_PREFIX, Command};
pub use completion::CompletionService;
pub use entity::{ASSISTANT_USER_ID, ASSISTANT_USER_NAME, Message, MessageKind, User};
pub use error::{CompletionError, PresenceError, RepositoryError, ValueObjectError};
pub use factory::{MessageIdFactory, SessionIdFactory};
pub use repository::MessageLogRepository;
pub use value_object::{
    Credential, DisplayName, MessageContent, MessageId, RoomName, SessionId, Timestamp, UserId,
};

#[cfg(test)]
pub use completion::MockCompletionService;
#[cfg(test)]
pub use repository::MockMessageLogRepository;
