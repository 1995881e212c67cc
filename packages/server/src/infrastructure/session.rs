//! 接続ごとのセッションストレージ
//!
//! WebSocket 接続 1 つにつき 1 つの `SessionSlot` を持ち、参加に成功した
//! Identity をバインドする。切断時に `take` で取り出してコーディネータに渡す。

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::{Identity, SessionBinder};

/// 接続にバインドされた Identity（最大 1 つ）
#[derive(Debug, Default)]
pub struct SessionSlot {
    identity: Mutex<Option<Identity>>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在バインドされている Identity
    pub fn identity(&self) -> Option<Identity> {
        self.lock().clone()
    }

    /// バインドされている Identity を取り出し、スロットを空にする
    pub fn take(&self) -> Option<Identity> {
        self.lock().take()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Identity>> {
        self.identity.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionBinder for SessionSlot {
    fn bind(&self, identity: &Identity) {
        *self.lock() = Some(identity.clone());
    }

    fn unbind(&self) {
        *self.lock() = None;
    }
}
