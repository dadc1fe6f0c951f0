//! Transport layer: axum server, WebSocket sessions and HTTP handlers.

mod handler;
mod server;
mod signal;
pub mod state;

pub use handler::SessionError;
pub use server::Server;
