//! PresenceRegistry trait 定義
//!
//! オンライン中の参加者集合（presence set）への唯一の入口。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::collections::BTreeSet;

use super::Identity;

/// Presence Registry trait
///
/// 全ての操作は同期的・インメモリで、外部 I/O を待たずに完了する。
/// 実装は `try_add` / `remove` / `contains` / `snapshot` を線形化可能に保つこと。
#[cfg_attr(test, mockall::automock)]
pub trait PresenceRegistry: Send + Sync {
    /// 未登録なら追加する。この呼び出しで追加した場合のみ `true`
    fn try_add(&self, identity: &Identity) -> bool;

    /// 登録済みなら削除する。この呼び出しで削除した場合のみ `true`
    fn remove(&self, identity: &Identity) -> bool;

    /// 現時点でオンラインかどうか
    fn contains(&self, identity: &Identity) -> bool;

    /// ある時点の presence set の独立したコピー
    fn snapshot(&self) -> BTreeSet<Identity>;

    /// オンライン中の参加者数
    fn count(&self) -> usize;
}
