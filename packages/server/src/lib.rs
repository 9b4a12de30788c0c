//! Huddle chat server library.
//!
//! A single-room real-time chat coordinator: WebSocket sessions join the
//! room, messages are persisted and broadcast, and `/ask` commands are
//! relayed to a completion service whose reply is broadcast as the
//! assistant participant.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod room;
pub mod ui;

// Re-export entry points
pub use config::ServerConfig;
pub use error::ServerError;
pub use ui::{build_router, run};
