//! Real-time chat relay.
//!
//! Each client holds one duplex WebSocket stream. The relay keeps a registry of
//! connected clients, each with its own mailbox, routes broadcast and private
//! messages between them and emits join/leave notices.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
