//! ClientRegistry の実装
//!
//! - `inmemory`: HashMap をプロセス内のレジストリとして使う実装

pub mod inmemory;

pub use inmemory::InMemoryClientRegistry;
