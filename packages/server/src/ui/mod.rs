//! WebSocket chat server implementation.

mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::{build_router, run};
