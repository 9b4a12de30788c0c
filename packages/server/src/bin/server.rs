//! Huddle chat server.
//!
//! Accepts WebSocket connections at `/ws`, broadcasts chat messages to every
//! participant and relays `/ask` commands to the completion service.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin huddle-server -- --database-url sqlite://huddle.db
//! ```

use clap::Parser;
use huddle_server::ServerConfig;
use huddle_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    // Run the server
    if let Err(e) = huddle_server::run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
