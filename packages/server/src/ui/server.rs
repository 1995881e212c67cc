//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    infrastructure::broadcaster::WebSocketBroadcaster,
    usecase::{BroadcastCoordinator, GetOnlineUsersUseCase},
};

use super::{
    handler::{get_online_users, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(coordinator, broadcaster, get_online_users_usecase);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// BroadcastCoordinator（presence 遷移とブロードキャストの調整）
    coordinator: Arc<BroadcastCoordinator>,
    /// WebSocketBroadcaster（購読者の管理）
    broadcaster: Arc<WebSocketBroadcaster>,
    /// GetOnlineUsersUseCase（オンライン参加者一覧取得のユースケース）
    get_online_users_usecase: Arc<GetOnlineUsersUseCase>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `coordinator` - Coordinator for presence transitions and broadcasts
    /// * `broadcaster` - Subscriber table shared with the coordinator's sink
    /// * `get_online_users_usecase` - UseCase for listing online users
    pub fn new(
        coordinator: Arc<BroadcastCoordinator>,
        broadcaster: Arc<WebSocketBroadcaster>,
        get_online_users_usecase: Arc<GetOnlineUsersUseCase>,
    ) -> Self {
        Self {
            coordinator,
            broadcaster,
            get_online_users_usecase,
        }
    }

    /// Build the axum router with all endpoints
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            coordinator: self.coordinator,
            broadcaster: self.broadcaster,
            get_online_users_usecase: self.get_online_users_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/users", get(get_online_users))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the WebSocket chat server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "WebSocket chat server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
