//! UseCase: セッションからの退出
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveSessionUseCase::execute() メソッド
//! - レジストリからの削除と LEAVE 通知のブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：退出後にレジストリから消え、残りの全員に LEAVE 通知が 1 件ずつ届く
//! - エッジケース：最後のクライアントの退出（通知対象なし）
//! - 異常系：未登録クライアントの退出

use std::sync::Arc;

use crate::domain::{ClientId, ClientRegistry, Envelope};

use super::{
    error::LeaveError,
    router::{DispatchOutcome, MessageRouter},
};

/// セッション退出のユースケース
pub struct LeaveSessionUseCase {
    /// レジストリ
    registry: Arc<dyn ClientRegistry>,
    /// LEAVE 通知の配送に使うルーター
    router: Arc<MessageRouter>,
}

impl LeaveSessionUseCase {
    pub fn new(registry: Arc<dyn ClientRegistry>, router: Arc<MessageRouter>) -> Self {
        Self { registry, router }
    }

    /// 退出を実行
    ///
    /// 登録を解除してから LEAVE 通知を配送するため、退出したクライアント
    /// 自身のメールボックスには何も追加されない。
    pub async fn execute(&self, client_id: ClientId) -> Result<DispatchOutcome, LeaveError> {
        if !self.registry.unregister(&client_id).await {
            return Err(LeaveError::NotRegistered(client_id.into_string()));
        }

        let notice = Envelope::leave(client_id, self.router.now());
        Ok(self.router.dispatch(notice).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_relay_shared::time::FixedClock;

    use crate::{
        domain::{EnvelopeKind, Timestamp},
        infrastructure::registry::InMemoryClientRegistry,
    };

    fn client(id: &str) -> ClientId {
        ClientId::new(id.to_string()).unwrap()
    }

    async fn create_usecase(ids: &[&str]) -> (Arc<InMemoryClientRegistry>, LeaveSessionUseCase) {
        let registry = Arc::new(InMemoryClientRegistry::new());
        for id in ids {
            registry.register(client(id)).await.unwrap();
        }
        let router = Arc::new(MessageRouter::new(
            registry.clone(),
            Arc::new(FixedClock::new(7000)),
        ));
        (registry.clone(), LeaveSessionUseCase::new(registry, router))
    }

    #[tokio::test]
    async fn test_leave_unregisters_and_notifies_each_remaining_client_once() {
        // テスト項目: 退出後に A はレジストリから消え、残りの全員に A の LEAVE 通知が 1 件ずつ届く
        // given (前提条件):
        let (registry, usecase) = create_usecase(&["alice", "bob", "charlie"]).await;

        // when (操作):
        let outcome = usecase.execute(client("alice")).await;

        // then (期待する結果):
        assert_eq!(outcome, Ok(DispatchOutcome::Delivered { recipients: 2 }));
        assert_eq!(registry.enumerate().await, vec![client("bob"), client("charlie")]);
        for id in ["bob", "charlie"] {
            let mail = registry.drain(&client(id)).await.unwrap();
            assert_eq!(mail, vec![Envelope::leave(client("alice"), Timestamp::new(7000))]);
            assert_eq!(mail[0].kind, EnvelopeKind::Leave);
        }
    }

    #[tokio::test]
    async fn test_last_client_leaving_notifies_nobody() {
        // テスト項目: 最後のクライアントが退出した場合、通知対象はいない
        // given (前提条件):
        let (registry, usecase) = create_usecase(&["alice"]).await;

        // when (操作):
        let outcome = usecase.execute(client("alice")).await;

        // then (期待する結果):
        assert_eq!(outcome, Ok(DispatchOutcome::Delivered { recipients: 0 }));
        assert!(registry.enumerate().await.is_empty());
    }

    #[tokio::test]
    async fn test_leave_when_not_registered() {
        // テスト項目: 未登録のクライアントの退出はエラーになり、通知も送られない
        // given (前提条件):
        let (registry, usecase) = create_usecase(&["bob"]).await;

        // when (操作):
        let outcome = usecase.execute(client("alice")).await;

        // then (期待する結果):
        assert_eq!(outcome, Err(LeaveError::NotRegistered("alice".to_string())));
        assert!(registry.drain(&client("bob")).await.unwrap().is_empty());
    }
}
