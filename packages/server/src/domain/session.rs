//! SessionBinder trait 定義

use super::Identity;

/// 接続（セッション）と Identity を結びつける capability
///
/// バインド先のストレージはトランスポート層が所有する。
/// 切断時にトランスポート層はここに保存された Identity を取り出し、
/// コーディネータに渡す。
#[cfg_attr(test, mockall::automock)]
pub trait SessionBinder: Send + Sync {
    /// 現在の接続に Identity をバインドする
    fn bind(&self, identity: &Identity);

    /// バインドを解除する
    fn unbind(&self);
}
