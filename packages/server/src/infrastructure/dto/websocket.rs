//! WebSocket event DTOs for the chat application.
//!
//! Both directions use the same envelope, `{"type": ..., "payload": ...}`.
//! Each direction is a closed enum so that unknown types are rejected by
//! serde at the boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{
    Credential, DisplayName, Message, MessageKind, User, UserId, ValueObjectError,
};

/// Events sent by clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum ClientEvent {
    Join(JoinPayload),
    Message(String),
}

/// Identity claimed by a `join` event
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinPayload {
    pub id: String,
    pub name: String,
    pub api_key: String,
}

impl fmt::Debug for JoinPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinPayload")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("api_key", &"***")
            .finish()
    }
}

impl TryFrom<JoinPayload> for User {
    type Error = ValueObjectError;

    fn try_from(payload: JoinPayload) -> Result<Self, Self::Error> {
        Ok(User::new(
            UserId::new(payload.id)?,
            DisplayName::new(payload.name)?,
            Credential::new(payload.api_key)?,
        ))
    }
}

/// Events sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum ServerEvent {
    Message(MessageDto),
    UserJoined(PresenceDto),
    UserLeft(PresenceDto),
    Error(String),
}

/// Message type on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    User,
    Llm,
}

impl From<MessageKind> for MessageType {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::User => MessageType::User,
            MessageKind::Assistant => MessageType::Llm,
        }
    }
}

/// Chat message broadcast to every session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub content: String,
    /// Unix timestamp (milliseconds since epoch) in UTC
    pub timestamp: i64,
    pub r#type: MessageType,
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.as_str().to_string(),
            user_id: message.author_id.as_str().to_string(),
            user_name: message.author_name.as_str().to_string(),
            content: message.content.as_str().to_string(),
            timestamp: message.timestamp.value(),
            r#type: message.kind.into(),
        }
    }
}

/// Public fields of a user, used by presence notifications
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceDto {
    pub id: String,
    pub name: String,
}

impl From<&User> for PresenceDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.as_str().to_string(),
            name: user.name.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageContent, MessageId, Timestamp};
    use serde_json::json;

    #[test]
    fn test_parse_join_event() {
        // テスト項目: join イベントを JSON からパースできる
        // given (前提条件):
        let text = r#"{"type":"join","payload":{"id":"u1","name":"Alice","apiKey":"sk-1"}}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        match event {
            ClientEvent::Join(payload) => {
                assert_eq!(payload.id, "u1");
                assert_eq!(payload.name, "Alice");
                assert_eq!(payload.api_key, "sk-1");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_parse_message_event() {
        // テスト項目: message イベントのペイロードは文字列としてパースされる
        // when (操作):
        let event: ClientEvent =
            serde_json::from_str(r#"{"type":"message","payload":"hi"}"#).unwrap();

        // then (期待する結果):
        assert!(matches!(event, ClientEvent::Message(text) if text == "hi"));
    }

    #[test]
    fn test_parse_unknown_type_fails() {
        // テスト項目: 未知の type はパースエラーになる
        // when (操作):
        let result = serde_json::from_str::<ClientEvent>(r#"{"type":"shout","payload":"hi"}"#);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_server_only_type_fails() {
        // テスト項目: サーバー送信専用の type をクライアントから送るとパースエラーになる
        // when (操作):
        let result = serde_json::from_str::<ClientEvent>(
            r#"{"type":"user-joined","payload":{"id":"u1","name":"Alice"}}"#,
        );

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_join_payload_debug_redacts_api_key() {
        // テスト項目: JoinPayload の Debug 出力に API キーが含まれない
        // given (前提条件):
        let payload = JoinPayload {
            id: "u1".to_string(),
            name: "Alice".to_string(),
            api_key: "sk-secret".to_string(),
        };

        // when (操作):
        let debug = format!("{payload:?}");

        // then (期待する結果):
        assert!(!debug.contains("sk-secret"));
    }

    #[test]
    fn test_join_payload_into_user() {
        // テスト項目: join ペイロードからユーザーを作成できる
        // given (前提条件):
        let payload = JoinPayload {
            id: "u1".to_string(),
            name: "Alice".to_string(),
            api_key: "sk-1".to_string(),
        };

        // when (操作):
        let user = User::try_from(payload).unwrap();

        // then (期待する結果):
        assert_eq!(user.id.as_str(), "u1");
        assert_eq!(user.name.as_str(), "Alice");
        assert_eq!(user.credential.expose_secret(), "sk-1");
    }

    #[test]
    fn test_join_payload_with_empty_api_key_fails() {
        // テスト項目: API キーが空の join ペイロードはユーザーに変換できない
        // given (前提条件):
        let payload = JoinPayload {
            id: "u1".to_string(),
            name: "Alice".to_string(),
            api_key: String::new(),
        };

        // when (操作):
        let result = User::try_from(payload);

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::CredentialEmpty);
    }

    #[test]
    fn test_serialize_message_event() {
        // テスト項目: message イベントがクライアントの期待する形式で出力される
        // given (前提条件):
        let user = User::new(
            UserId::new("u1".to_string()).unwrap(),
            DisplayName::new("Alice".to_string()).unwrap(),
            Credential::new("sk-1".to_string()).unwrap(),
        );
        let message = Message::from_user(
            MessageId::new("m1".to_string()).unwrap(),
            &user,
            MessageContent::new("hi".to_string()).unwrap(),
            Timestamp::new(1000),
        );

        // when (操作):
        let value = serde_json::to_value(ServerEvent::Message(MessageDto::from(&message))).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({
                "type": "message",
                "payload": {
                    "id": "m1",
                    "userId": "u1",
                    "userName": "Alice",
                    "content": "hi",
                    "timestamp": 1000,
                    "type": "user"
                }
            })
        );
    }

    #[test]
    fn test_serialize_presence_and_error_events() {
        // テスト項目: user-joined / user-left / error イベントの形式
        // given (前提条件):
        let presence = PresenceDto {
            id: "u2".to_string(),
            name: "Bob".to_string(),
        };

        // then (期待する結果):
        assert_eq!(
            serde_json::to_value(ServerEvent::UserJoined(presence.clone())).unwrap(),
            json!({"type": "user-joined", "payload": {"id": "u2", "name": "Bob"}})
        );
        assert_eq!(
            serde_json::to_value(ServerEvent::UserLeft(presence)).unwrap(),
            json!({"type": "user-left", "payload": {"id": "u2", "name": "Bob"}})
        );
        assert_eq!(
            serde_json::to_value(ServerEvent::Error("oops".to_string())).unwrap(),
            json!({"type": "error", "payload": "oops"})
        );
    }
}
