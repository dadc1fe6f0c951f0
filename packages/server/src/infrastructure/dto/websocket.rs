//! WebSocket frame DTOs.
//!
//! Every text frame on the chat stream, in either direction, is one JSON
//! `ChatMessage`.

use serde::{Deserialize, Serialize};

/// Message kind. Discriminants match the protocol enum values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum MessageType {
    #[default]
    Broadcast = 0,
    Private = 1,
    Join = 2,
    Leave = 3,
}

/// One chat protocol message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub client_id: String,
    #[serde(default)]
    pub message: String,
    /// Empty means broadcast
    #[serde(default)]
    pub target_client_id: String,
    /// Unix timestamp in milliseconds
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub r#type: MessageType,
}

impl ChatMessage {
    /// First message on a stream: announces `client_id` and nothing else.
    pub fn handshake(client_id: String, timestamp: i64) -> Self {
        Self {
            client_id,
            message: String::new(),
            target_client_id: String::new(),
            timestamp,
            r#type: MessageType::Join,
        }
    }

    pub fn broadcast(client_id: String, message: String, timestamp: i64) -> Self {
        Self {
            client_id,
            message,
            target_client_id: String::new(),
            timestamp,
            r#type: MessageType::Broadcast,
        }
    }

    pub fn private(
        client_id: String,
        target_client_id: String,
        message: String,
        timestamp: i64,
    ) -> Self {
        Self {
            client_id,
            message,
            target_client_id,
            timestamp,
            r#type: MessageType::Private,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_wire_names() {
        // テスト項目: MessageType が大文字の名前で JSON にシリアライズされる
        // given (前提条件):
        let msg = ChatMessage::private(
            "bob".to_string(),
            "alice".to_string(),
            "hi".to_string(),
            1000,
        );

        // when (操作):
        let json = serde_json::to_value(&msg).unwrap();

        // then (期待する結果):
        assert_eq!(json["type"], "PRIVATE");
        assert_eq!(json["target_client_id"], "alice");
        assert_eq!(MessageType::Leave as i32, 3);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        // テスト項目: client_id 以外のフィールドが省略されても既定値でデシリアライズされる
        // given (前提条件):
        let json = r#"{"client_id":"alice"}"#;

        // when (操作):
        let msg: ChatMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(msg.client_id, "alice");
        assert_eq!(msg.message, "");
        assert_eq!(msg.target_client_id, "");
        assert_eq!(msg.timestamp, 0);
        assert_eq!(msg.r#type, MessageType::Broadcast);
    }

    #[test]
    fn test_missing_client_id_is_rejected() {
        // テスト項目: client_id が無いフレームはデシリアライズに失敗する
        // given (前提条件):
        let json = r#"{"message":"hello"}"#;

        // when (操作):
        let result = serde_json::from_str::<ChatMessage>(json);

        // then (期待する結果):
        assert!(result.is_err());
    }
}
