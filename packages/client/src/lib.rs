//! Console client for the chat relay.

mod domain;
mod error;
mod formatter;
mod input;
mod runner;
mod session;
mod ui;

pub use domain::generate_client_id;
pub use error::ClientError;
pub use runner::run_client;
