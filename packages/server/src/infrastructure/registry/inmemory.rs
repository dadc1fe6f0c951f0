//! InMemory ClientRegistry 実装
//!
//! ドメイン層が定義する `ClientRegistry` trait の具体的な実装。
//! `ClientId → Mailbox` の HashMap を 1 つの `tokio::sync::Mutex` で保護します。
//!
//! ## ロック規律
//!
//! 登録・登録解除・列挙・配送・drain はすべて同じロックの下で 1 回のクリティカル
//! セクションとして実行されます。ブロードキャストの「列挙してから追加」が
//! 並行する登録解除と交錯することはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ClientId, ClientRegistry, Delivery, Envelope, Mailbox, MailboxHandle, Recipients,
    RegistryError,
};

/// インメモリ ClientRegistry 実装
#[derive(Debug, Default)]
pub struct InMemoryClientRegistry {
    /// 接続中のクライアントとそのメールボックス
    mailboxes: Mutex<HashMap<ClientId, Mailbox>>,
}

impl InMemoryClientRegistry {
    /// 空のレジストリを作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientRegistry for InMemoryClientRegistry {
    async fn register(&self, client_id: ClientId) -> Result<MailboxHandle, RegistryError> {
        let mut mailboxes = self.mailboxes.lock().await;
        if mailboxes.contains_key(&client_id) {
            return Err(RegistryError::DuplicateClientId(client_id.into_string()));
        }

        let mailbox = Mailbox::new();
        let handle = mailbox.handle(client_id.clone());
        mailboxes.insert(client_id.clone(), mailbox);
        tracing::debug!("Client '{}' registered ({} connected)", client_id, mailboxes.len());

        Ok(handle)
    }

    async fn unregister(&self, client_id: &ClientId) -> bool {
        let mut mailboxes = self.mailboxes.lock().await;
        match mailboxes.remove(client_id) {
            Some(mailbox) => {
                if !mailbox.is_empty() {
                    tracing::debug!(
                        "Discarding {} undelivered envelope(s) for '{}'",
                        mailbox.len(),
                        client_id
                    );
                }
                // 所有者の pusher を起こし、drain が None を返すことに気付かせる
                mailbox.wake();
                tracing::debug!(
                    "Client '{}' unregistered ({} connected)",
                    client_id,
                    mailboxes.len()
                );
                true
            }
            None => false,
        }
    }

    async fn lookup(&self, client_id: &ClientId) -> Option<MailboxHandle> {
        let mailboxes = self.mailboxes.lock().await;
        mailboxes
            .get(client_id)
            .map(|mailbox| mailbox.handle(client_id.clone()))
    }

    async fn enumerate(&self) -> Vec<ClientId> {
        let mailboxes = self.mailboxes.lock().await;
        let mut client_ids: Vec<ClientId> = mailboxes.keys().cloned().collect();
        client_ids.sort();
        client_ids
    }

    async fn deliver(&self, recipients: Recipients, envelope: Envelope) -> Delivery {
        let mut mailboxes = self.mailboxes.lock().await;

        match recipients {
            Recipients::One(target) => match mailboxes.get_mut(&target) {
                Some(mailbox) => {
                    mailbox.push(envelope);
                    Delivery::Delivered(1)
                }
                None => Delivery::TargetNotFound,
            },
            Recipients::AllExcept(excluded) => {
                let mut delivered = 0;
                for (client_id, mailbox) in mailboxes.iter_mut() {
                    if client_id != &excluded {
                        mailbox.push(envelope.clone());
                        delivered += 1;
                    }
                }
                Delivery::Delivered(delivered)
            }
        }
    }

    async fn drain(&self, client_id: &ClientId) -> Option<Vec<Envelope>> {
        let mut mailboxes = self.mailboxes.lock().await;
        mailboxes.get_mut(client_id).map(Mailbox::drain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::BTreeSet, sync::Arc, time::Duration};

    use crate::domain::{EnvelopeKind, Timestamp};

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - register / unregister / lookup / enumerate / deliver / drain
    // - 重複登録の拒否
    // - 並行した登録・登録解除後の列挙結果
    //
    // 【なぜこのテストが必要か】
    // - レジストリは「誰が接続中か」の唯一の情報源であり、
    //   全セッションから並行して操作される共有状態の中核
    // ========================================

    fn client(id: &str) -> ClientId {
        ClientId::new(id.to_string()).unwrap()
    }

    fn chat(from: &str, body: &str) -> Envelope {
        Envelope::broadcast(client(from), body.to_string(), Timestamp::new(1000))
    }

    #[tokio::test]
    async fn test_register_then_enumerate() {
        // テスト項目: 登録したクライアントが ID 順に列挙される
        // given (前提条件):
        let registry = InMemoryClientRegistry::new();

        // when (操作):
        registry.register(client("charlie")).await.unwrap();
        registry.register(client("alice")).await.unwrap();

        // then (期待する結果):
        assert_eq!(
            registry.enumerate().await,
            vec![client("alice"), client("charlie")]
        );
    }

    #[tokio::test]
    async fn test_register_duplicate_is_rejected_and_keeps_original() {
        // テスト項目: 接続中の ID での再登録は拒否され、既存のメールボックスは保持される
        // given (前提条件):
        let registry = InMemoryClientRegistry::new();
        registry.register(client("alice")).await.unwrap();
        registry
            .deliver(Recipients::One(client("alice")), chat("bob", "kept"))
            .await;

        // when (操作):
        let result = registry.register(client("alice")).await;

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            RegistryError::DuplicateClientId("alice".to_string())
        );
        let drained = registry.drain(&client("alice")).await.unwrap();
        assert_eq!(drained, vec![chat("bob", "kept")]);
    }

    #[tokio::test]
    async fn test_unregister_removes_entry_and_is_idempotent() {
        // テスト項目: 登録解除でエントリが消え、2 回目の解除は何もしない
        // given (前提条件):
        let registry = InMemoryClientRegistry::new();
        registry.register(client("alice")).await.unwrap();

        // when (操作):
        let first = registry.unregister(&client("alice")).await;
        let second = registry.unregister(&client("alice")).await;

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert!(registry.enumerate().await.is_empty());
        assert!(registry.lookup(&client("alice")).await.is_none());
        assert!(registry.drain(&client("alice")).await.is_none());
    }

    #[tokio::test]
    async fn test_lookup_returns_owner_handle_woken_by_delivery() {
        // テスト項目: 登録済み ID の lookup は所有者用ハンドルを返し、配送でそのハンドルが起きる
        // given (前提条件):
        let registry = InMemoryClientRegistry::new();
        registry.register(client("alice")).await.unwrap();

        // when (操作):
        let handle = registry.lookup(&client("alice")).await.unwrap();
        registry
            .deliver(Recipients::One(client("alice")), chat("bob", "hi"))
            .await;

        // then (期待する結果):
        assert_eq!(handle.client_id(), &client("alice"));
        tokio::time::timeout(Duration::from_secs(1), handle.notified())
            .await
            .expect("delivery should wake the mailbox owner");
        assert_eq!(
            registry.drain(&client("alice")).await.unwrap(),
            vec![chat("bob", "hi")]
        );
    }

    #[tokio::test]
    async fn test_deliver_all_except_skips_excluded_client() {
        // テスト項目: AllExcept は除外クライアント以外の全員に配送する
        // given (前提条件):
        let registry = InMemoryClientRegistry::new();
        for id in ["alice", "bob", "charlie"] {
            registry.register(client(id)).await.unwrap();
        }

        // when (操作):
        let delivery = registry
            .deliver(Recipients::AllExcept(client("alice")), chat("alice", "hi"))
            .await;

        // then (期待する結果):
        assert_eq!(delivery, Delivery::Delivered(2));
        assert!(registry.drain(&client("alice")).await.unwrap().is_empty());
        assert_eq!(registry.drain(&client("bob")).await.unwrap().len(), 1);
        assert_eq!(registry.drain(&client("charlie")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_deliver_to_unknown_target_does_not_create_entry() {
        // テスト項目: 未登録の宛先への配送は TargetNotFound となり、エントリは作られない
        // given (前提条件):
        let registry = InMemoryClientRegistry::new();
        registry.register(client("alice")).await.unwrap();

        // when (操作):
        let delivery = registry
            .deliver(Recipients::One(client("ghost")), chat("alice", "hi"))
            .await;

        // then (期待する結果):
        assert_eq!(delivery, Delivery::TargetNotFound);
        assert_eq!(registry.enumerate().await, vec![client("alice")]);
    }

    #[tokio::test]
    async fn test_deliver_wakes_mailbox_owner() {
        // テスト項目: 配送するとメールボックスの所有者が起こされる
        // given (前提条件):
        let registry = InMemoryClientRegistry::new();
        let handle = registry.register(client("bob")).await.unwrap();

        // when (操作):
        registry
            .deliver(Recipients::One(client("bob")), chat("alice", "wake up"))
            .await;
        let woke = tokio::time::timeout(Duration::from_secs(1), handle.notified()).await;

        // then (期待する結果):
        assert!(woke.is_ok());
        let drained = registry.drain(&client("bob")).await.unwrap();
        assert_eq!(drained[0].kind, EnvelopeKind::Broadcast);
        assert_eq!(drained[0].body, "wake up");
    }

    #[tokio::test]
    async fn test_concurrent_register_and_unregister_leaves_exact_set() {
        // テスト項目: 並行に登録・登録解除した後、列挙結果が接続中のクライアントと一致する
        // given (前提条件):
        let registry = Arc::new(InMemoryClientRegistry::new());
        let total = 64;

        // when (操作): 全員を並行に登録し、偶数番号のクライアントだけを並行に解除する
        let mut tasks = Vec::new();
        for n in 0..total {
            let registry = Arc::clone(&registry);
            tasks.push(tokio::spawn(async move {
                let id = client(&format!("client-{}", n));
                registry.register(id.clone()).await.unwrap();
                tokio::task::yield_now().await;
                if n % 2 == 0 {
                    assert!(registry.unregister(&id).await);
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        // then (期待する結果):
        let expected: BTreeSet<ClientId> = (0..total)
            .filter(|n| n % 2 == 1)
            .map(|n| client(&format!("client-{}", n)))
            .collect();
        let actual: BTreeSet<ClientId> = registry.enumerate().await.into_iter().collect();
        assert_eq!(actual, expected);
    }
}
