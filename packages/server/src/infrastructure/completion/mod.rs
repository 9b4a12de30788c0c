//! Completion service clients.

mod openai;

pub use openai::{DEFAULT_COMPLETION_BASE_URL, DEFAULT_COMPLETION_MODEL, OpenAiCompletionService};
