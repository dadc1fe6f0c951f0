//! Chat relay server.
//!
//! Accepts one WebSocket stream per client on `/chat`, relays broadcast and
//! private messages and announces joins and leaves.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chat-relay-server
//! cargo run --bin chat-relay-server -- --host 0.0.0.0 --port 50054
//! ```

use std::sync::Arc;

use chat_relay_server::{
    infrastructure::registry::InMemoryClientRegistry,
    ui::Server,
    usecase::{JoinSessionUseCase, LeaveSessionUseCase, ListClientsUseCase, MessageRouter},
};
use chat_relay_shared::{logger::setup_logger, time::SystemClock};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "chat-relay-server")]
#[command(about = "Real-time chat relay with broadcast and private messages", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "50054")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry
    // 2. Router
    // 3. UseCases
    // 4. Server

    // 1. Create Registry (in-memory, process-wide)
    let registry = Arc::new(InMemoryClientRegistry::new());

    // 2. Create Router
    let router = Arc::new(MessageRouter::new(registry.clone(), Arc::new(SystemClock)));

    // 3. Create UseCases
    let join_session_usecase = Arc::new(JoinSessionUseCase::new(registry.clone(), router.clone()));
    let leave_session_usecase =
        Arc::new(LeaveSessionUseCase::new(registry.clone(), router.clone()));
    let list_clients_usecase = Arc::new(ListClientsUseCase::new(registry.clone()));

    // 4. Create and run the server
    let server = Server::new(
        registry,
        router,
        join_session_usecase,
        leave_session_usecase,
        list_clients_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
