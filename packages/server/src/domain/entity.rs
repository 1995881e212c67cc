//! Entities.

use std::fmt;

use super::value_object::Identity;

/// メッセージの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Chat,
    Join,
    Leave,
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageType::Chat => "CHAT",
            MessageType::Join => "JOIN",
            MessageType::Leave => "LEAVE",
        };
        f.write_str(name)
    }
}

/// チャンネルに流れるイベント
///
/// `Chat` はクライアントから受け取ったものをそのまま中継する。
/// `Join` / `Leave` はコーディネータだけが生成する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    kind: MessageType,
    sender: Identity,
    content: String,
}

impl ChatEvent {
    pub fn new(kind: MessageType, sender: Identity, content: String) -> Self {
        Self {
            kind,
            sender,
            content,
        }
    }

    /// チャットメッセージを作成
    pub fn chat(sender: Identity, content: impl Into<String>) -> Self {
        Self::new(MessageType::Chat, sender, content.into())
    }

    /// 参加通知を作成（`"<identity> has joined"`）
    pub fn join(sender: Identity) -> Self {
        let content = format!("{} has joined", sender);
        Self::new(MessageType::Join, sender, content)
    }

    /// 退出通知を作成（`"<identity> has left the chat"`）
    pub fn leave(sender: Identity) -> Self {
        let content = format!("{} has left the chat", sender);
        Self::new(MessageType::Leave, sender, content)
    }

    pub fn kind(&self) -> MessageType {
        self.kind
    }

    pub fn sender(&self) -> &Identity {
        &self.sender
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
