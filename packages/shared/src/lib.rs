//! Utilities shared by the chat relay server and client.

pub mod logger;
pub mod time;
