//! Conversion logic between DTOs and domain entities.

use crate::domain::{self, Broadcast, ChatEvent, Identity, ValueObjectError};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain Entity
// ========================================

impl From<dto::MessageType> for domain::MessageType {
    fn from(dto: dto::MessageType) -> Self {
        match dto {
            dto::MessageType::Chat => Self::Chat,
            dto::MessageType::Join => Self::Join,
            dto::MessageType::Leave => Self::Leave,
        }
    }
}

impl TryFrom<dto::ChatMessage> for ChatEvent {
    type Error = ValueObjectError;

    fn try_from(dto: dto::ChatMessage) -> Result<Self, Self::Error> {
        let sender = Identity::new(dto.sender)?;
        Ok(ChatEvent::new(dto.r#type.into(), sender, dto.content))
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<domain::MessageType> for dto::MessageType {
    fn from(model: domain::MessageType) -> Self {
        match model {
            domain::MessageType::Chat => Self::Chat,
            domain::MessageType::Join => Self::Join,
            domain::MessageType::Leave => Self::Leave,
        }
    }
}

impl From<&ChatEvent> for dto::ChatMessage {
    fn from(model: &ChatEvent) -> Self {
        Self {
            r#type: model.kind().into(),
            sender: model.sender().as_str().to_string(),
            content: model.content().to_string(),
        }
    }
}

impl From<&Broadcast> for dto::ServerFrame {
    fn from(model: &Broadcast) -> Self {
        match model {
            Broadcast::Public(event) => Self::Public(event.into()),
            Broadcast::Users(users) => Self::Users(
                users
                    .iter()
                    .map(|identity| identity.as_str().to_string())
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn test_dto_chat_message_to_domain() {
        // テスト項目: DTO の ChatMessage がドメインの ChatEvent に変換される
        // given (前提条件):
        let dto_msg = dto::ChatMessage {
            r#type: dto::MessageType::Chat,
            sender: "alice".to_string(),
            content: "Hello!".to_string(),
        };

        // when (操作):
        let event = ChatEvent::try_from(dto_msg).unwrap();

        // then (期待する結果):
        assert_eq!(event.kind(), domain::MessageType::Chat);
        assert_eq!(event.sender().as_str(), "alice");
        assert_eq!(event.content(), "Hello!");
    }

    #[test]
    fn test_dto_chat_message_keeps_join_kind() {
        // テスト項目: DTO の種類はそのまま保たれる（検証はコーディネータが行う）
        // given (前提条件):
        let dto_msg = dto::ChatMessage {
            r#type: dto::MessageType::Join,
            sender: "mallory".to_string(),
            content: String::new(),
        };

        // when (操作):
        let event = ChatEvent::try_from(dto_msg).unwrap();

        // then (期待する結果):
        assert_eq!(event.kind(), domain::MessageType::Join);
    }

    #[test]
    fn test_dto_chat_message_with_empty_sender_fails() {
        // テスト項目: sender が空の DTO は変換できない
        // given (前提条件):
        let dto_msg = dto::ChatMessage {
            r#type: dto::MessageType::Chat,
            sender: String::new(),
            content: "Hello!".to_string(),
        };

        // when (操作):
        let result = ChatEvent::try_from(dto_msg);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyIdentity));
    }

    #[test]
    fn test_users_broadcast_to_frame_is_sorted() {
        // テスト項目: 参加者一覧のブロードキャストが昇順のリストになる
        // given (前提条件):
        let users: BTreeSet<Identity> = ["charlie", "alice", "bob"]
            .into_iter()
            .map(|name| Identity::try_from(name).unwrap())
            .collect();

        // when (操作):
        let frame = dto::ServerFrame::from(&Broadcast::Users(users));

        // then (期待する結果):
        assert_eq!(
            frame,
            dto::ServerFrame::Users(vec![
                "alice".to_string(),
                "bob".to_string(),
                "charlie".to_string()
            ])
        );
    }

    #[test]
    fn test_public_broadcast_to_frame() {
        // テスト項目: 公開チャンネルのブロードキャストが public フレームになる
        // given (前提条件):
        let event = ChatEvent::join(Identity::try_from("alice").unwrap());

        // when (操作):
        let frame = dto::ServerFrame::from(&Broadcast::Public(event));

        // then (期待する結果):
        assert_eq!(
            frame,
            dto::ServerFrame::Public(dto::ChatMessage {
                r#type: dto::MessageType::Join,
                sender: "alice".to_string(),
                content: "alice has joined".to_string(),
            })
        );
    }
}
