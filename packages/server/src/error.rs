//! Server startup errors.

use thiserror::Error;

use crate::domain::{CompletionError, RepositoryError, ValueObjectError};

/// Failures that prevent the server from starting or keep it from serving
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ValueObjectError),

    #[error("Failed to open message log: {0}")]
    Storage(#[from] RepositoryError),

    #[error("Failed to build completion client: {0}")]
    Completion(#[from] CompletionError),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}
