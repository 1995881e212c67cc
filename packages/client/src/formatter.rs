//! Message formatting utilities for client display.

use hiroba_server::infrastructure::dto::websocket::{ChatMessage, MessageType};
use hiroba_shared::time::timestamp_to_jst_clock;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a public-channel event
    ///
    /// # Arguments
    ///
    /// * `message` - The event received on the public topic
    /// * `received_at` - Unix timestamp when the event was received (milliseconds)
    ///
    /// # Returns
    ///
    /// A formatted string for the event
    pub fn format_public(message: &ChatMessage, received_at: i64) -> String {
        let clock = timestamp_to_jst_clock(received_at);
        match message.r#type {
            MessageType::Chat => format!("\n[{}] @{}: {}\n", clock, message.sender, message.content),
            MessageType::Join => format!("\n[{}] + {}\n", clock, message.content),
            MessageType::Leave => format!("\n[{}] - {}\n", clock, message.content),
        }
    }

    /// Format the online-users list, marking the current user
    ///
    /// # Arguments
    ///
    /// * `users` - Sorted list of online identities
    /// * `current_name` - The current client's name (to mark as "me")
    ///
    /// # Returns
    ///
    /// A formatted string with the user list
    pub fn format_users(users: &[String], current_name: &str) -> String {
        let mut output = String::new();
        output.push_str("\n============================================================\n");
        output.push_str(&format!("Online ({}):\n", users.len()));

        if users.is_empty() {
            output.push_str("(No one online)\n");
        } else {
            for user in users {
                let me_suffix = if user == current_name { " (me)" } else { "" };
                output.push_str(&format!("{}{}\n", user, me_suffix));
            }
        }

        output.push_str("============================================================\n");
        output
    }

    /// Format an error reported by the server
    pub fn format_error(message: &str) -> String {
        format!("\n! {}\n", message)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2025-01-01T12:34:56+09:00
    const NOON_JST: i64 = 1_735_702_496_000;

    fn message(r#type: MessageType, sender: &str, content: &str) -> ChatMessage {
        ChatMessage {
            r#type,
            sender: sender.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_format_chat_message() {
        // テスト項目: チャットメッセージが時刻と送信者付きで整形される
        // given (前提条件):
        let msg = message(MessageType::Chat, "alice", "hi");

        // when (操作):
        let result = MessageFormatter::format_public(&msg, NOON_JST);

        // then (期待する結果):
        assert_eq!(result, "\n[12:34:56] @alice: hi\n");
    }

    #[test]
    fn test_format_join_and_leave_use_content() {
        // テスト項目: JOIN / LEAVE はサーバーが作った本文を表示する
        // given (前提条件):
        let joined = message(MessageType::Join, "bob", "bob has joined");
        let left = message(MessageType::Leave, "bob", "bob has left the chat");

        // when (操作):
        let joined = MessageFormatter::format_public(&joined, NOON_JST);
        let left = MessageFormatter::format_public(&left, NOON_JST);

        // then (期待する結果):
        assert_eq!(joined, "\n[12:34:56] + bob has joined\n");
        assert_eq!(left, "\n[12:34:56] - bob has left the chat\n");
    }

    #[test]
    fn test_format_users_marks_me() {
        // テスト項目: 自分の名前に (me) が付く
        // given (前提条件):
        let users = vec!["alice".to_string(), "bob".to_string()];

        // when (操作):
        let result = MessageFormatter::format_users(&users, "bob");

        // then (期待する結果):
        assert!(result.contains("Online (2):"));
        assert!(result.contains("alice\n"));
        assert!(result.contains("bob (me)\n"));
        assert!(!result.contains("alice (me)"));
    }

    #[test]
    fn test_format_users_empty() {
        // テスト項目: 誰もいない場合、その旨が表示される
        // given (前提条件):
        let users: Vec<String> = vec![];

        // when (操作):
        let result = MessageFormatter::format_users(&users, "alice");

        // then (期待する結果):
        assert!(result.contains("Online (0):"));
        assert!(result.contains("(No one online)"));
    }

    #[test]
    fn test_format_error() {
        // テスト項目: エラーが ! 付きで表示される
        assert_eq!(
            MessageFormatter::format_error("identity must not be empty"),
            "\n! identity must not be empty\n"
        );
    }
}
