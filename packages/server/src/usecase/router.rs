//! UseCase: メッセージのルーティング
//!
//! 受信したエンベロープから宛先集合を決め、各宛先のメールボックスに追加します。
//!
//! - PRIVATE（宛先あり）: 宛先のメールボックスのみ
//! - PRIVATE（宛先なし）: 送信者自身に SERVER のエラー通知
//! - BROADCAST / JOIN / LEAVE: 送信者以外の全員
//!
//! ルーティングは I/O で待たず、レジストリの登録状態も変更しません。

use std::sync::Arc;

use chat_relay_shared::time::Clock;

use crate::domain::{
    ClientId, ClientRegistry, Delivery, Envelope, EnvelopeKind, Recipients, Timestamp,
};

/// Result of one dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Number of mailboxes that received the envelope
    Delivered { recipients: usize },
    /// Private target was not connected; the sender got an error notice
    TargetNotFound { target: ClientId },
}

/// メッセージルーター
pub struct MessageRouter {
    /// レジストリ（メールボックスの所有者）
    registry: Arc<dyn ClientRegistry>,
    /// SERVER 通知のタイムスタンプ用
    clock: Arc<dyn Clock>,
}

impl MessageRouter {
    pub fn new(registry: Arc<dyn ClientRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// 現在時刻
    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }

    /// エンベロープを宛先のメールボックスに配送する
    pub async fn dispatch(&self, envelope: Envelope) -> DispatchOutcome {
        let sender = envelope.from.clone();

        match envelope.kind.clone() {
            EnvelopeKind::Private(target) => {
                match self
                    .registry
                    .deliver(Recipients::One(target.clone()), envelope)
                    .await
                {
                    Delivery::Delivered(recipients) => {
                        tracing::debug!("Private message '{}' -> '{}'", sender, target);
                        DispatchOutcome::Delivered { recipients }
                    }
                    Delivery::TargetNotFound => {
                        tracing::info!(
                            "Private target '{}' not found, notifying '{}'",
                            target,
                            sender
                        );
                        self.notify(&sender, format!("User {} not found", target))
                            .await;
                        DispatchOutcome::TargetNotFound { target }
                    }
                }
            }
            EnvelopeKind::Broadcast | EnvelopeKind::Join | EnvelopeKind::Leave => {
                let recipients = match self
                    .registry
                    .deliver(Recipients::AllExcept(sender.clone()), envelope)
                    .await
                {
                    Delivery::Delivered(recipients) => recipients,
                    Delivery::TargetNotFound => 0,
                };
                tracing::debug!("Fanned out from '{}' to {} client(s)", sender, recipients);
                DispatchOutcome::Delivered { recipients }
            }
        }
    }

    /// SERVER からの通知を 1 クライアントに送る
    pub async fn notify(&self, client_id: &ClientId, body: String) -> Delivery {
        let notice = Envelope::server_notice(body, self.now());
        self.registry
            .deliver(Recipients::One(client_id.clone()), notice)
            .await
    }
}
