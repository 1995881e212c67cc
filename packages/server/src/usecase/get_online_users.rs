//! UseCase: オンライン参加者一覧の取得

use std::sync::Arc;

use crate::domain::{Identity, PresenceRegistry};

/// オンライン参加者一覧取得のユースケース
pub struct GetOnlineUsersUseCase {
    registry: Arc<dyn PresenceRegistry>,
}

impl GetOnlineUsersUseCase {
    pub fn new(registry: Arc<dyn PresenceRegistry>) -> Self {
        Self { registry }
    }

    /// オンライン参加者を Identity の昇順で返す
    pub fn execute(&self) -> Vec<Identity> {
        self.registry.snapshot().into_iter().collect()
    }
}
