//! WebSocket chat server with presence tracking.
//!
//! Clients join the shared channel with a display name; join, leave and chat
//! events are broadcast to every connected client together with the list of
//! online users.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use hiroba_server::{
    infrastructure::{broadcaster::WebSocketBroadcaster, registry::InMemoryPresenceRegistry},
    ui::Server,
    usecase::{BroadcastCoordinator, GetOnlineUsersUseCase},
};
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "WebSocket chat server with presence tracking", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. PresenceRegistry
    // 2. Broadcaster
    // 3. UseCases
    // 4. Server

    // 1. Create PresenceRegistry (in-memory presence set)
    let registry = Arc::new(InMemoryPresenceRegistry::new());

    // 2. Create Broadcaster (WebSocket fanout)
    let broadcaster = Arc::new(WebSocketBroadcaster::new());

    // 3. Create UseCases
    let coordinator = Arc::new(BroadcastCoordinator::new(
        registry.clone(),
        broadcaster.clone(),
    ));
    let get_online_users_usecase = Arc::new(GetOnlineUsersUseCase::new(registry));

    // 4. Create and run the server
    let server = Server::new(coordinator, broadcaster, get_online_users_usecase);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
