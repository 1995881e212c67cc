//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ChatEvent, Identity},
    infrastructure::{
        broadcaster::ConnectionId,
        dto::websocket::{ClientFrame, ServerFrame},
        session::SessionSlot,
    },
    ui::state::AppState,
    usecase::DisconnectOutcome,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: broadcasts and error frames
/// queued for this connection are sent over its WebSocket.
///
/// # Arguments
///
/// * `rx` - Channel receiver for frames queued for this connection
/// * `sender` - WebSocket sink to send messages to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let session = Arc::new(SessionSlot::new());

    // Subscribe before reading anything so this connection sees its own join
    let (tx, rx) = mpsc::unbounded_channel();
    state.broadcaster.subscribe(connection_id, tx);
    tracing::info!("Connection '{}' opened", connection_id);

    // Send current online users to the newly connected client
    state.coordinator.handle_connect(|message| {
        state
            .broadcaster
            .push_to(&connection_id, &ServerFrame::from(message))
    });

    let (sender, mut receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let session_clone = session.clone();

    // Spawn a task to receive frames from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_text(&state_clone, connection_id, &session_clone, text.as_str());
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, stop the other
    let recv_finished = tokio::select! {
        _ = &mut recv_task => true,
        _ = &mut send_task => false,
    };
    let unfinished = if recv_finished { send_task } else { recv_task };

    close_connection(&state, connection_id, &session, unfinished).await;
}

/// Stop the remaining connection task, then release the connection.
///
/// `abort` cannot interrupt a join that is already running on another worker,
/// so the task is awaited before the session slot is read. Otherwise the join
/// could bind and add after the slot was taken and leave the identity online.
async fn close_connection(
    state: &AppState,
    connection_id: ConnectionId,
    session: &SessionSlot,
    unfinished: JoinHandle<()>,
) -> DisconnectOutcome {
    unfinished.abort();
    if let Err(e) = unfinished.await
        && !e.is_cancelled()
    {
        tracing::warn!("Connection task for '{}' failed: {}", connection_id, e);
    }

    state.broadcaster.unsubscribe(&connection_id);
    let outcome = state.coordinator.handle_disconnect(session.take().as_ref());
    tracing::info!("Connection '{}' closed ({:?})", connection_id, outcome);
    outcome
}

/// Dispatch one inbound text frame.
fn handle_text(state: &AppState, connection_id: ConnectionId, session: &SessionSlot, text: &str) {
    let frame = match serde_json::from_str::<ClientFrame>(text) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!("Failed to parse frame from '{}': {}", connection_id, e);
            reply_error(state, connection_id, format!("malformed frame: {}", e));
            return;
        }
    };

    match frame {
        ClientFrame::AddUser(message) => {
            if let Some(bound) = session.identity() {
                tracing::warn!(
                    "Connection '{}' already joined as '{}', ignoring add_user for '{}'",
                    connection_id,
                    bound,
                    message.sender
                );
                return;
            }

            tracing::info!(
                "User '{}' attempting to join with connection '{}'",
                message.sender,
                connection_id
            );
            match Identity::new(message.sender) {
                Ok(identity) => {
                    state.coordinator.handle_join(identity, session);
                }
                Err(e) => reply_error(state, connection_id, e.to_string()),
            }
        }
        ClientFrame::SendMessage(message) => {
            let event = match ChatEvent::try_from(message) {
                Ok(event) => event,
                Err(e) => {
                    reply_error(state, connection_id, e.to_string());
                    return;
                }
            };

            if let Err(e) = state.coordinator.relay_chat_message(event) {
                reply_error(state, connection_id, e.to_string());
            }
        }
    }
}

fn reply_error(state: &AppState, connection_id: ConnectionId, message: String) {
    if let Err(e) = state
        .broadcaster
        .push_to(&connection_id, &ServerFrame::error(message))
    {
        tracing::warn!("Failed to send error frame to '{}': {}", connection_id, e);
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::mpsc as std_mpsc, thread, time::Duration};

    use super::*;
    use crate::{
        domain::SessionBinder,
        infrastructure::{broadcaster::WebSocketBroadcaster, registry::InMemoryPresenceRegistry},
        usecase::{BroadcastCoordinator, GetOnlineUsersUseCase},
    };

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - close_connection: 接続終了時の後始末
    //
    // 【なぜこのテストが必要か】
    // - abort は別スレッドで実行中の同期処理（handle_join）を止められない
    // - 実行中の join を待たずにスロットを読むと、退出が告知されず presence が残る
    //
    // 【どのようなシナリオをテストするか】
    // 1. bind の途中にある join が、後始末の後に presence を残さない
    // 2. 参加前の接続の後始末は何も告知しない
    // ========================================

    /// bind に時間がかかる SessionBinder
    struct SlowBinder {
        slot: Arc<SessionSlot>,
        started: std_mpsc::Sender<()>,
    }

    impl SessionBinder for SlowBinder {
        fn bind(&self, identity: &Identity) {
            self.started.send(()).ok();
            thread::sleep(Duration::from_millis(200));
            self.slot.bind(identity);
        }

        fn unbind(&self) {
            self.slot.unbind();
        }
    }

    fn create_state() -> Arc<AppState> {
        let registry = Arc::new(InMemoryPresenceRegistry::new());
        let broadcaster = Arc::new(WebSocketBroadcaster::new());
        let coordinator = Arc::new(BroadcastCoordinator::new(
            registry.clone(),
            broadcaster.clone(),
        ));
        Arc::new(AppState {
            coordinator,
            broadcaster,
            get_online_users_usecase: Arc::new(GetOnlineUsersUseCase::new(registry)),
        })
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_close_connection_waits_for_join_in_flight() {
        // テスト項目: bind の途中で接続が閉じても、join の完了を待ってから退出処理する
        // given (前提条件):
        let state = create_state();
        let session = Arc::new(SessionSlot::new());
        let connection_id = ConnectionId::generate();
        let (started_tx, started_rx) = std_mpsc::channel();
        let binder = SlowBinder {
            slot: session.clone(),
            started: started_tx,
        };
        let state_clone = state.clone();
        let recv_task = tokio::spawn(async move {
            let alice = Identity::try_from("alice").unwrap();
            state_clone.coordinator.handle_join(alice, &binder);
        });
        tokio::task::spawn_blocking(move || started_rx.recv())
            .await
            .unwrap()
            .unwrap();

        // when (操作):
        let outcome = close_connection(&state, connection_id, &session, recv_task).await;

        // then (期待する結果):
        assert_eq!(outcome, DisconnectOutcome::Left);
        assert_eq!(session.identity(), None);
        assert!(state.get_online_users_usecase.execute().is_empty());
    }

    #[tokio::test]
    async fn test_close_connection_before_join_is_silent() {
        // テスト項目: 参加前の接続を閉じても退出は告知されない
        // given (前提条件):
        let state = create_state();
        let session = SessionSlot::new();
        let connection_id = ConnectionId::generate();
        let (tx, mut rx) = mpsc::unbounded_channel();
        state.broadcaster.subscribe(ConnectionId::generate(), tx);
        let idle_task = tokio::spawn(std::future::pending::<()>());

        // when (操作):
        let outcome = close_connection(&state, connection_id, &session, idle_task).await;

        // then (期待する結果):
        assert_eq!(outcome, DisconnectOutcome::NotPresent);
        assert!(rx.try_recv().is_err());
    }
}
