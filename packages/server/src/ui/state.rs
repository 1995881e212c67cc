//! Server state.

use std::sync::Arc;

use crate::{
    infrastructure::broadcaster::WebSocketBroadcaster,
    usecase::{BroadcastCoordinator, GetOnlineUsersUseCase},
};

/// Shared application state
pub struct AppState {
    /// BroadcastCoordinator（presence 遷移とブロードキャストの調整）
    pub coordinator: Arc<BroadcastCoordinator>,
    /// WebSocketBroadcaster（購読者の管理と個別送信）
    pub broadcaster: Arc<WebSocketBroadcaster>,
    /// GetOnlineUsersUseCase（オンライン参加者一覧取得のユースケース）
    pub get_online_users_usecase: Arc<GetOnlineUsersUseCase>,
}
