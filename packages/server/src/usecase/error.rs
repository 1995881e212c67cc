//! UseCase errors.

use thiserror::Error;

use crate::domain::MessageType;

/// コーディネータのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinatorError {
    /// chat 経路に CHAT 以外の種類のメッセージが送られた
    #[error("invalid message type on chat endpoint: {0}")]
    InvalidMessageKind(MessageType),
}
