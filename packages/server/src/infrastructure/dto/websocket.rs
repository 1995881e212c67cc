//! WebSocket frame DTOs.
//!
//! Client → server frames are addressed by `action`, server → client frames by `topic`:
//!
//! ```text
//! {"action":"add_user","message":{"type":"JOIN","sender":"alice","content":""}}
//! {"action":"send_message","message":{"type":"CHAT","sender":"alice","content":"hi"}}
//!
//! {"topic":"public","payload":{"type":"JOIN","sender":"alice","content":"alice has joined"}}
//! {"topic":"users","payload":["alice","bob"]}
//! {"topic":"error","payload":{"message":"..."}}
//! ```

use serde::{Deserialize, Serialize};

/// Message type on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageType {
    Chat,
    Join,
    Leave,
}

/// Chat message payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub r#type: MessageType,
    pub sender: String,
    #[serde(default)]
    pub content: String,
}

/// Client → server frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "message", rename_all = "snake_case")]
pub enum ClientFrame {
    /// Join the channel as `message.sender`
    AddUser(ChatMessage),
    /// Send a chat message to the channel
    SendMessage(ChatMessage),
}

/// Server → client frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "topic", content = "payload", rename_all = "snake_case")]
pub enum ServerFrame {
    /// Public channel event (chat / join / leave)
    Public(ChatMessage),
    /// Online users, sorted
    Users(Vec<String>),
    /// Error sent only to the offending connection
    Error(ErrorPayload),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

impl ServerFrame {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ErrorPayload {
            message: message.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_add_user_frame() {
        // テスト項目: add_user フレームを読み込める（content は省略可能）
        // given (前提条件):
        let text = r#"{"action":"add_user","message":{"type":"JOIN","sender":"alice"}}"#;

        // when (操作):
        let frame: ClientFrame = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            frame,
            ClientFrame::AddUser(ChatMessage {
                r#type: MessageType::Join,
                sender: "alice".to_string(),
                content: String::new(),
            })
        );
    }

    #[test]
    fn test_deserialize_send_message_frame() {
        // テスト項目: send_message フレームを読み込める
        // given (前提条件):
        let text =
            r#"{"action":"send_message","message":{"type":"CHAT","sender":"bob","content":"hi"}}"#;

        // when (操作):
        let frame: ClientFrame = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            frame,
            ClientFrame::SendMessage(ChatMessage {
                r#type: MessageType::Chat,
                sender: "bob".to_string(),
                content: "hi".to_string(),
            })
        );
    }

    #[test]
    fn test_deserialize_unknown_action_fails() {
        // テスト項目: 未知の action はエラーになる
        // given (前提条件):
        let text = r#"{"action":"subscribe","message":{"type":"CHAT","sender":"bob"}}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientFrame>(text);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_server_frames() {
        // テスト項目: サーバーフレームが topic / payload 形式で書き出される
        // given (前提条件):
        let public = ServerFrame::Public(ChatMessage {
            r#type: MessageType::Leave,
            sender: "alice".to_string(),
            content: "alice has left the chat".to_string(),
        });
        let users = ServerFrame::Users(vec!["bob".to_string()]);
        let error = ServerFrame::error("boom");

        // when (操作):
        let public = serde_json::to_value(&public).unwrap();
        let users = serde_json::to_value(&users).unwrap();
        let error = serde_json::to_value(&error).unwrap();

        // then (期待する結果):
        assert_eq!(
            public,
            json!({
                "topic": "public",
                "payload": {"type": "LEAVE", "sender": "alice", "content": "alice has left the chat"}
            })
        );
        assert_eq!(users, json!({"topic": "users", "payload": ["bob"]}));
        assert_eq!(
            error,
            json!({"topic": "error", "payload": {"message": "boom"}})
        );
    }
}
