//! Errors reported back to a single session.
//!
//! The `Display` text of each variant is what the client receives in the
//! `error` event payload.

use thiserror::Error;

use crate::domain::ValueObjectError;

/// Recoverable failure while handling one inbound event
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomEventError {
    /// The frame is not a valid client envelope
    #[error("Failed to process message: {0}")]
    Malformed(String),

    /// Only text frames carry events
    #[error("Binary frames are not supported")]
    UnsupportedFrame,

    /// A message event arrived before any join
    #[error("Join the room before sending messages")]
    NotJoined,

    /// A second join on the same session
    #[error("Already joined")]
    AlreadyJoined,

    /// The join payload failed validation
    #[error("Invalid join: {0}")]
    InvalidJoin(ValueObjectError),

    /// The message content failed validation
    #[error("Invalid message: {0}")]
    InvalidMessage(ValueObjectError),

    /// The session is not registered in the room
    #[error("Session is not connected")]
    UnknownSession,
}
