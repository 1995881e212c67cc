//! Domain errors.

use thiserror::Error;

/// Value object の生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// Identity が空文字列
    #[error("identity must not be empty")]
    EmptyIdentity,
}

/// ブロードキャスト（fanout）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BroadcastError {
    /// ワイヤーフォーマットへの変換に失敗
    #[error("failed to serialize broadcast: {0}")]
    Serialization(String),

    /// 購読者への送信に失敗
    #[error("failed to push message: {0}")]
    PushFailed(String),
}
