//! Conversion logic between DTOs and domain entities.

use thiserror::Error;

use crate::domain::{ClientId, Envelope, EnvelopeKind, Timestamp, ValueObjectError};
use crate::infrastructure::dto::websocket::{ChatMessage, MessageType};

/// Why an inbound frame could not become an envelope
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("private message needs a target client id")]
    MissingTarget,

    #[error("invalid target client id: {0}")]
    InvalidTarget(ValueObjectError),

    /// Clients may not send JOIN/LEAVE notices themselves
    #[error("{0:?} notices are generated by the relay")]
    NoticeFromClient(MessageType),
}

// ========================================
// DTO → Domain Entity
// ========================================

impl ChatMessage {
    /// Interpret an inbound frame as an envelope sent by `sender`.
    ///
    /// The session's identity is authoritative: the frame's own `client_id` is
    /// ignored. A positive client timestamp is kept, otherwise `received_at`
    /// is used.
    pub fn into_envelope(
        self,
        sender: ClientId,
        received_at: Timestamp,
    ) -> Result<Envelope, ConversionError> {
        let timestamp = if self.timestamp > 0 {
            Timestamp::new(self.timestamp)
        } else {
            received_at
        };

        match self.r#type {
            MessageType::Broadcast => Ok(Envelope::broadcast(sender, self.message, timestamp)),
            MessageType::Private => {
                if self.target_client_id.is_empty() {
                    return Err(ConversionError::MissingTarget);
                }
                let target = ClientId::new(self.target_client_id)
                    .map_err(ConversionError::InvalidTarget)?;
                Ok(Envelope::private(sender, target, self.message, timestamp))
            }
            notice @ (MessageType::Join | MessageType::Leave) => {
                Err(ConversionError::NoticeFromClient(notice))
            }
        }
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<Envelope> for ChatMessage {
    fn from(envelope: Envelope) -> Self {
        let (r#type, target_client_id) = match envelope.kind {
            EnvelopeKind::Broadcast => (MessageType::Broadcast, String::new()),
            EnvelopeKind::Private(target) => (MessageType::Private, target.into_string()),
            EnvelopeKind::Join => (MessageType::Join, String::new()),
            EnvelopeKind::Leave => (MessageType::Leave, String::new()),
        };

        Self {
            client_id: envelope.from.into_string(),
            message: envelope.body,
            target_client_id,
            timestamp: envelope.timestamp.value(),
            r#type,
        }
    }
}
