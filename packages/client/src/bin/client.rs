//! Console chat client for the relay.
//!
//! Every line typed is broadcast; `/private <client_id> <message>` sends to a
//! single client and `/quit` exits. Reconnects on connection loss (max 5
//! attempts, 5 second interval); a rejected client id exits immediately.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chat-relay-client -- --client-id alice
//! cargo run --bin chat-relay-client -- -c bob -u ws://127.0.0.1:50054/chat
//! ```

use clap::Parser;

use chat_relay_client::{generate_client_id, run_client};
use chat_relay_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "chat-relay-client")]
#[command(about = "Console client for the chat relay", long_about = None)]
struct Args {
    /// Client ID (must be unique on the relay; generated when omitted)
    #[arg(short = 'c', long)]
    client_id: Option<String>,

    /// Relay WebSocket URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:50054/chat")]
    url: String,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let client_id = args.client_id.unwrap_or_else(generate_client_id);

    if let Err(e) = run_client(args.url, client_id).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
