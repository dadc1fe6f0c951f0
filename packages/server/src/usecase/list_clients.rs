//! UseCase: 接続中クライアントの一覧取得

use std::sync::Arc;

use crate::domain::{ClientId, ClientRegistry};

/// 接続中クライアント一覧取得のユースケース
pub struct ListClientsUseCase {
    registry: Arc<dyn ClientRegistry>,
}

impl ListClientsUseCase {
    pub fn new(registry: Arc<dyn ClientRegistry>) -> Self {
        Self { registry }
    }

    /// ID 順にソートされた接続中クライアントの一覧
    pub async fn execute(&self) -> Vec<ClientId> {
        self.registry.enumerate().await
    }
}
