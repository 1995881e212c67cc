//! Broadcast（fanout）の定義

use std::collections::BTreeSet;

use super::{BroadcastError, ChatEvent, Identity};

/// チャンネルの全購読者に配信するメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Broadcast {
    /// 公開チャンネルへのイベント（chat / join / leave）
    Public(ChatEvent),
    /// オンライン参加者一覧
    Users(BTreeSet<Identity>),
}

/// Broadcast sink trait
///
/// コーディネータは発行するメッセージごとに 1 回、発行順に `broadcast` を呼ぶ。
/// 実装はブロックしてはならない（キューに積んで即座に戻る）。
#[cfg_attr(test, mockall::automock)]
pub trait BroadcastSink: Send + Sync {
    fn broadcast(&self, message: &Broadcast) -> Result<(), BroadcastError>;
}
