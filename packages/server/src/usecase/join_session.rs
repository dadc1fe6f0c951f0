//! UseCase: セッションへの参加
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinSessionUseCase::execute() メソッド
//! - レジストリへの登録と JOIN 通知のブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規クライアントの参加と既存クライアントへの JOIN 通知
//! - 異常系：接続中の ID での参加、予約済み ID（SERVER）での参加

use std::sync::Arc;

use crate::domain::{ClientId, ClientRegistry, Envelope, MailboxHandle};

use super::{
    error::JoinError,
    router::{DispatchOutcome, MessageRouter},
};

/// セッション参加のユースケース
pub struct JoinSessionUseCase {
    /// レジストリ
    registry: Arc<dyn ClientRegistry>,
    /// JOIN 通知の配送に使うルーター
    router: Arc<MessageRouter>,
}

impl JoinSessionUseCase {
    pub fn new(registry: Arc<dyn ClientRegistry>, router: Arc<MessageRouter>) -> Self {
        Self { registry, router }
    }

    /// 参加を実行
    ///
    /// 登録に成功すると、自分以外の全員に JOIN 通知を送り、
    /// 自分のメールボックスのハンドルを返す。
    pub async fn execute(&self, client_id: ClientId) -> Result<MailboxHandle, JoinError> {
        if client_id.is_server() {
            return Err(JoinError::ReservedClientId(client_id.into_string()));
        }

        let mailbox = self.registry.register(client_id.clone()).await?;

        let notice = Envelope::join(client_id.clone(), self.router.now());
        if let DispatchOutcome::Delivered { recipients } = self.router.dispatch(notice).await {
            tracing::info!("'{}' joined, notified {} client(s)", client_id, recipients);
        }

        Ok(mailbox)
    }
}
