//! WebSocket を使った BroadcastSink 実装
//!
//! ## 責務
//!
//! - 購読者（WebSocket 接続）ごとの `UnboundedSender` を管理
//! - ブロードキャストのワイヤーフォーマットへの変換と全購読者への送信
//! - 特定の接続だけへの送信（エラーフレーム）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 送信はキューに積むだけなのでブロックしません。各接続のキューは FIFO なので、
//! 発行順がそのまま各購読者への配信順になります。

use std::fmt;

use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::{
    domain::{Broadcast, BroadcastError, BroadcastSink},
    infrastructure::dto::websocket::ServerFrame,
};

/// 購読者へのメッセージ送信チャンネル（JSON テキスト）
pub type SubscriberChannel = mpsc::UnboundedSender<String>;

/// WebSocket 接続の識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// WebSocket を使った BroadcastSink 実装
#[derive(Debug, Default)]
pub struct WebSocketBroadcaster {
    /// 接続中の購読者
    ///
    /// Key: ConnectionId
    /// Value: SubscriberChannel
    subscribers: DashMap<ConnectionId, SubscriberChannel>,
}

impl WebSocketBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// 購読者を登録
    pub fn subscribe(&self, connection_id: ConnectionId, sender: SubscriberChannel) {
        self.subscribers.insert(connection_id, sender);
        tracing::debug!("Connection '{}' subscribed", connection_id);
    }

    /// 購読者を登録解除
    pub fn unsubscribe(&self, connection_id: &ConnectionId) {
        if self.subscribers.remove(connection_id).is_some() {
            tracing::debug!("Connection '{}' unsubscribed", connection_id);
        }
    }

    fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// 特定の接続だけにフレームを送信
    pub fn push_to(
        &self,
        connection_id: &ConnectionId,
        frame: &ServerFrame,
    ) -> Result<(), BroadcastError> {
        let text = encode(frame)?;
        let sender = self.subscribers.get(connection_id).ok_or_else(|| {
            BroadcastError::PushFailed(format!("connection '{}' not found", connection_id))
        })?;
        sender
            .send(text)
            .map_err(|e| BroadcastError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed frame to connection '{}'", connection_id);
        Ok(())
    }
}

impl BroadcastSink for WebSocketBroadcaster {
    fn broadcast(&self, message: &Broadcast) -> Result<(), BroadcastError> {
        let text = encode(&ServerFrame::from(message))?;

        // ブロードキャストでは一部の送信失敗を許容
        for entry in self.subscribers.iter() {
            if let Err(e) = entry.value().send(text.clone()) {
                tracing::warn!(
                    "Failed to push message to connection '{}': {}",
                    entry.key(),
                    e
                );
            }
        }
        tracing::debug!("Broadcasted frame to {} subscribers", self.subscriber_count());

        Ok(())
    }
}

fn encode(frame: &ServerFrame) -> Result<String, BroadcastError> {
    serde_json::to_string(frame).map_err(|e| BroadcastError::Serialization(e.to_string()))
}
