//! InMemory PresenceRegistry 実装
//!
//! ドメイン層が定義する PresenceRegistry trait の具体的な実装。
//! `RwLock<HashSet<Identity>>` を presence set として使用します。
//! 更新（追加・削除）は write lock、参照（contains / snapshot / count）は read lock を取るため、
//! 全ての操作は線形化可能です。

use std::{
    collections::{BTreeSet, HashSet},
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::domain::{Identity, PresenceRegistry};

/// インメモリ PresenceRegistry 実装
#[derive(Debug, Default)]
pub struct InMemoryPresenceRegistry {
    online_users: RwLock<HashSet<Identity>>,
}

impl InMemoryPresenceRegistry {
    /// 新しい InMemoryPresenceRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }

    // 各操作は集合を中途半端な状態で残さないので、poison は無視してよい
    fn read(&self) -> RwLockReadGuard<'_, HashSet<Identity>> {
        self.online_users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashSet<Identity>> {
        self.online_users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl PresenceRegistry for InMemoryPresenceRegistry {
    fn try_add(&self, identity: &Identity) -> bool {
        let mut online_users = self.write();
        let added = online_users.insert(identity.clone());

        if added {
            tracing::info!(
                "User added to online users: {}. Current online users: {}",
                identity,
                online_users.len()
            );
        } else {
            tracing::warn!("Attempt to add existing user to online list: {}", identity);
        }
        added
    }

    fn remove(&self, identity: &Identity) -> bool {
        let mut online_users = self.write();
        let removed = online_users.remove(identity);

        if removed {
            tracing::info!(
                "User removed from online users: {}. Current online users: {}",
                identity,
                online_users.len()
            );
        } else {
            tracing::warn!(
                "Attempt to remove non-existing user from online list: {}",
                identity
            );
        }
        removed
    }

    fn contains(&self, identity: &Identity) -> bool {
        self.read().contains(identity)
    }

    fn snapshot(&self) -> BTreeSet<Identity> {
        self.read().iter().cloned().collect()
    }

    fn count(&self) -> usize {
        self.read().len()
    }
}
