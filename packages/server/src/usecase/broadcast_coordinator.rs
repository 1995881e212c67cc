//! UseCase: presence 遷移とブロードキャストの調整
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - BroadcastCoordinator の handle_join / handle_chat_message / handle_disconnect
//! - presence set の遷移と、発行されるブロードキャストの順序
//!
//! ### なぜこのテストが必要か
//! - presence の状態とそれを告知するメッセージが食い違わないことを保証する
//! - join / disconnect の冪等性（重複参加・重複切断で再告知しない）を保証する
//! - chat 経路が presence set に一切触れないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加・チャット・退出の一連の流れ
//! - 異常系：chat 経路への JOIN / LEAVE の送信、sink の送信失敗
//! - エッジケース：同一 Identity の同時参加、参加前の切断、同時の参加と退出

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{
    Broadcast, BroadcastError, BroadcastSink, ChatEvent, Identity, MessageType,
    PresenceRegistry, SessionBinder,
};

use super::error::CoordinatorError;

/// `handle_join` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// この呼び出しで参加し、告知した
    Joined,
    /// 既にオンライン（重複参加）。状態変更・告知なし
    AlreadyOnline,
}

/// `handle_disconnect` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectOutcome {
    /// この呼び出しで退出し、告知した
    Left,
    /// バインドされた Identity がない、または既に退出済み
    NotPresent,
}

/// presence 遷移とブロードキャストを調整するコーディネータ
///
/// 参加・退出の遷移（registry の更新）と、その告知（JOIN / LEAVE と参加者一覧）は
/// `announce_lock` の中で一続きに行う。これにより同じ Identity について
/// LEAVE の後に JOIN が届くことはなく、参加者一覧は常に遷移後の状態を反映する。
/// chat の中継はこのロックを取らない。
pub struct BroadcastCoordinator {
    /// PresenceRegistry（オンライン参加者集合）
    registry: Arc<dyn PresenceRegistry>,
    /// BroadcastSink（全購読者への fanout）
    sink: Arc<dyn BroadcastSink>,
    announce_lock: Mutex<()>,
}

impl BroadcastCoordinator {
    /// 新しい BroadcastCoordinator を作成
    pub fn new(registry: Arc<dyn PresenceRegistry>, sink: Arc<dyn BroadcastSink>) -> Self {
        Self {
            registry,
            sink,
            announce_lock: Mutex::new(()),
        }
    }

    /// 新しい接続に現在の参加者一覧を送る
    ///
    /// 一覧の取得と `push` は announce lock の中で行う。呼び出し前に購読を
    /// 済ませておけば、この一覧より古い状態がその接続に後から届くことはない。
    ///
    /// # Arguments
    ///
    /// * `push` - 新しい接続だけにメッセージを送る関数
    pub fn handle_connect<F>(&self, push: F)
    where
        F: FnOnce(&Broadcast) -> Result<(), BroadcastError>,
    {
        let _announcing = self.lock_announcements();

        let users = self.registry.snapshot();
        let count = users.len();
        if let Err(e) = push(&Broadcast::Users(users)) {
            tracing::warn!("Failed to send user list to new connection: {}", e);
        } else {
            tracing::debug!("Sent current user list to new connection. Count: {}", count);
        }
    }

    /// 参加リクエストを処理
    ///
    /// 1. 既にオンラインなら何もしない（重複参加）
    /// 2. registry に追加する前にセッションへバインドする
    /// 3. `try_add` が成功した場合のみ JOIN と参加者一覧をこの順で発行する
    ///
    /// `try_add` が競合に負けた場合はバインドを解除する。負けた接続が切断しても
    /// 勝った接続の presence は残る。
    ///
    /// # Arguments
    ///
    /// * `identity` - 参加する Identity
    /// * `session_binder` - 呼び出し元の接続に Identity をバインドする capability
    pub fn handle_join(
        &self,
        identity: Identity,
        session_binder: &dyn SessionBinder,
    ) -> JoinOutcome {
        if self.registry.contains(&identity) {
            tracing::warn!(
                "User '{}' attempted to join but is already online. Online users: {}",
                identity,
                self.registry.count()
            );
            return JoinOutcome::AlreadyOnline;
        }

        session_binder.bind(&identity);
        tracing::debug!("User '{}' bound to session", identity);

        let _announcing = self.lock_announcements();

        if !self.registry.try_add(&identity) {
            tracing::warn!(
                "User '{}' was added by a concurrent join, not announcing",
                identity
            );
            session_binder.unbind();
            return JoinOutcome::AlreadyOnline;
        }

        self.emit(Broadcast::Public(ChatEvent::join(identity.clone())));
        tracing::info!("Sent JOIN message for '{}'", identity);

        let users = self.registry.snapshot();
        let count = users.len();
        self.emit(Broadcast::Users(users));
        tracing::info!("Sent updated user list. Count: {}", count);

        JoinOutcome::Joined
    }

    /// chat 経路で受け取ったイベントを検証する
    ///
    /// CHAT 以外は `CoordinatorError::InvalidMessageKind` で拒否する。
    /// registry には触れず、イベントを変更せずに返す。
    pub fn handle_chat_message(&self, event: ChatEvent) -> Result<ChatEvent, CoordinatorError> {
        if event.kind() != MessageType::Chat {
            tracing::warn!(
                "Received non-CHAT message type ({}) on chat endpoint from '{}'",
                event.kind(),
                event.sender()
            );
            return Err(CoordinatorError::InvalidMessageKind(event.kind()));
        }

        tracing::info!(
            "Received CHAT message: from='{}', content='{}'",
            event.sender(),
            event.content()
        );
        Ok(event)
    }

    /// chat イベントを検証し、公開チャンネルへ中継する
    pub fn relay_chat_message(&self, event: ChatEvent) -> Result<ChatEvent, CoordinatorError> {
        let event = self.handle_chat_message(event)?;
        self.emit(Broadcast::Public(event.clone()));
        Ok(event)
    }

    /// 接続の切断を処理
    ///
    /// # Arguments
    ///
    /// * `identity` - 切断されたセッションにバインドされていた Identity（なければ `None`）
    pub fn handle_disconnect(&self, identity: Option<&Identity>) -> DisconnectOutcome {
        let Some(identity) = identity else {
            tracing::warn!("Could not find an identity for the disconnected session");
            return DisconnectOutcome::NotPresent;
        };

        tracing::info!("User disconnected: {}", identity);

        let _announcing = self.lock_announcements();

        if !self.registry.remove(identity) {
            tracing::debug!("User '{}' was already removed, not announcing", identity);
            return DisconnectOutcome::NotPresent;
        }

        self.emit(Broadcast::Public(ChatEvent::leave(identity.clone())));

        let users = self.registry.snapshot();
        let count = users.len();
        self.emit(Broadcast::Users(users));
        tracing::info!(
            "Sent LEAVE message and updated user list for '{}'. Online users: {}",
            identity,
            count
        );

        DisconnectOutcome::Left
    }

    fn lock_announcements(&self) -> MutexGuard<'_, ()> {
        self.announce_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// sink の失敗は記録するだけで、presence の遷移は巻き戻さない
    fn emit(&self, message: Broadcast) {
        if let Err(e) = self.sink.broadcast(&message) {
            tracing::warn!("Failed to broadcast message: {}", e);
        }
    }
}
