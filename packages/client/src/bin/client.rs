//! WebSocket chat client with reconnection support.
//!
//! Connects to a Hiroba server, joins the channel with the given name and sends
//! every line typed at the ">" prompt as a chat message.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//! A name that is already online is rejected.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client -- --name alice
//! cargo run --bin hiroba-client -- -n bob -u ws://127.0.0.1:3000/ws
//! ```

use clap::Parser;
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-client")]
#[command(about = "WebSocket chat client with presence", long_about = None)]
struct Args {
    /// Display name used to join the channel
    #[arg(short = 'n', long)]
    name: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = hiroba_client::run_client(args.url, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
