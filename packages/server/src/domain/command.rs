//! Chat commands embedded in message content.

use super::value_object::MessageContent;

/// Marker that turns a message into a completion request
pub const ASK_COMMAND_PREFIX: &str = "/ask ";

/// Command recognized in a user message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward the query to the completion service
    Ask { query: String },
}

impl Command {
    /// Parse a command out of message content.
    ///
    /// The prefix must start the content exactly. A prefix with nothing but
    /// whitespace after it is an ordinary message.
    pub fn parse(content: &MessageContent) -> Option<Self> {
        let query = content.as_str().strip_prefix(ASK_COMMAND_PREFIX)?.trim();
        if query.is_empty() {
            return None;
        }
        Some(Command::Ask {
            query: query.to_string(),
        })
    }
}
