//! Core domain models for the chat application.

use serde::{Deserialize, Serialize};

use super::value_object::{
    Credential, DisplayName, MessageContent, MessageId, Timestamp, UserId,
};

/// Author id of messages produced by the completion relay
pub const ASSISTANT_USER_ID: &str = "llm";

/// Author name of messages produced by the completion relay
pub const ASSISTANT_USER_NAME: &str = "AI Assistant";

/// Identity claimed by a session through a join event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// User identifier
    pub id: UserId,
    /// Name shown to other participants
    pub name: DisplayName,
    /// Key used against the completion service on this user's behalf
    pub credential: Credential,
}

impl User {
    /// Create a new user
    pub fn new(id: UserId, name: DisplayName, credential: Credential) -> Self {
        Self {
            id,
            name,
            credential,
        }
    }
}

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    /// Typed by a joined user
    User,
    /// Reply from the completion service
    Assistant,
}

impl MessageKind {
    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::User => "user",
            MessageKind::Assistant => "llm",
        }
    }
}

/// Represents a chat message in the domain model
///
/// Immutable once created by the room coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub author_id: UserId,
    pub author_name: DisplayName,
    pub content: MessageContent,
    pub timestamp: Timestamp,
    pub kind: MessageKind,
}

impl Message {
    /// Create a message typed by `author`
    pub fn from_user(
        id: MessageId,
        author: &User,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            author_id: author.id.clone(),
            author_name: author.name.clone(),
            content,
            timestamp,
            kind: MessageKind::User,
        }
    }

    /// Create a message on behalf of the assistant participant
    pub fn from_assistant(id: MessageId, content: MessageContent, timestamp: Timestamp) -> Self {
        Self {
            id,
            author_id: UserId::assistant(),
            author_name: DisplayName::assistant(),
            content,
            timestamp,
            kind: MessageKind::Assistant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::factory::MessageIdFactory;

    fn alice() -> User {
        User::new(
            UserId::new("u1".to_string()).unwrap(),
            DisplayName::new("Alice".to_string()).unwrap(),
            Credential::new("sk-alice".to_string()).unwrap(),
        )
    }

    #[test]
    fn test_message_from_user() {
        // テスト項目: ユーザーのメッセージは投稿者の公開情報を持つ
        // given (前提条件):
        let user = alice();
        let content = MessageContent::new("hi".to_string()).unwrap();

        // when (操作):
        let message = Message::from_user(
            MessageIdFactory::generate(),
            &user,
            content,
            Timestamp::new(1000),
        );

        // then (期待する結果):
        assert_eq!(message.author_id.as_str(), "u1");
        assert_eq!(message.author_name.as_str(), "Alice");
        assert_eq!(message.kind, MessageKind::User);
        assert_eq!(message.timestamp, Timestamp::new(1000));
    }

    #[test]
    fn test_message_from_assistant() {
        // テスト項目: アシスタントのメッセージは固定の投稿者 ID と名前を持つ
        // when (操作):
        let message = Message::from_assistant(
            MessageIdFactory::generate(),
            MessageContent::new("4".to_string()).unwrap(),
            Timestamp::new(2000),
        );

        // then (期待する結果):
        assert_eq!(message.author_id.as_str(), ASSISTANT_USER_ID);
        assert_eq!(message.author_name.as_str(), ASSISTANT_USER_NAME);
        assert_eq!(message.kind, MessageKind::Assistant);
        assert_eq!(message.kind.as_str(), "llm");
    }
}
