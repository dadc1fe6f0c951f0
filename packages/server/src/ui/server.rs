//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    domain::ClientRegistry,
    usecase::{JoinSessionUseCase, LeaveSessionUseCase, ListClientsUseCase, MessageRouter},
};

use super::{
    handler::{chat_handler, health_check, list_clients},
    signal::shutdown_signal,
    state::AppState,
};

/// Chat relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(registry, router, join, leave, list_clients);
/// server.run("127.0.0.1".to_string(), 50054).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        registry: Arc<dyn ClientRegistry>,
        router: Arc<MessageRouter>,
        join_session_usecase: Arc<JoinSessionUseCase>,
        leave_session_usecase: Arc<LeaveSessionUseCase>,
        list_clients_usecase: Arc<ListClientsUseCase>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                registry,
                router,
                join_session_usecase,
                leave_session_usecase,
                list_clients_usecase,
            }),
        }
    }

    /// Route table
    fn app(&self) -> Router {
        Router::new()
            // duplex chat stream
            .route("/chat", get(chat_handler))
            // HTTP endpoints
            .route("/api/health", get(health_check))
            .route("/api/clients", get(list_clients))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the relay until Ctrl+C / SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 50054)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/chat", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.app())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
