//! Request handlers.

mod http;
mod websocket;

pub use http::{health_check, list_clients};
pub use websocket::{SessionError, chat_handler};
