//! Entities: envelopes and per-client mailboxes.

use std::{collections::VecDeque, sync::Arc};

use tokio::sync::Notify;

use super::value_object::{ClientId, Timestamp};

/// What an envelope is and, for private messages, where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeKind {
    Broadcast,
    Private(ClientId),
    Join,
    Leave,
}

/// One chat protocol message unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub from: ClientId,
    pub body: String,
    pub kind: EnvelopeKind,
    pub timestamp: Timestamp,
}

impl Envelope {
    pub fn broadcast(from: ClientId, body: String, timestamp: Timestamp) -> Self {
        Self {
            from,
            body,
            kind: EnvelopeKind::Broadcast,
            timestamp,
        }
    }

    pub fn private(from: ClientId, target: ClientId, body: String, timestamp: Timestamp) -> Self {
        Self {
            from,
            body,
            kind: EnvelopeKind::Private(target),
            timestamp,
        }
    }

    /// Notice that `subject` joined. Attributed to the joining client.
    pub fn join(subject: ClientId, timestamp: Timestamp) -> Self {
        let body = format!("{} joined the chat", subject);
        Self {
            from: subject,
            body,
            kind: EnvelopeKind::Join,
            timestamp,
        }
    }

    /// Notice that `subject` left. Attributed to the leaving client.
    pub fn leave(subject: ClientId, timestamp: Timestamp) -> Self {
        let body = format!("{} left the chat", subject);
        Self {
            from: subject,
            body,
            kind: EnvelopeKind::Leave,
            timestamp,
        }
    }

    /// Relay-authored notice, delivered as a broadcast-kind envelope from `SERVER`.
    pub fn server_notice(body: String, timestamp: Timestamp) -> Self {
        Self::broadcast(ClientId::server(), body, timestamp)
    }

    pub fn target(&self) -> Option<&ClientId> {
        match &self.kind {
            EnvelopeKind::Private(target) => Some(target),
            _ => None,
        }
    }
}

/// Per-client FIFO queue of pending envelopes.
///
/// Every push wakes the owner through the shared [`Notify`]. `notify_one`
/// stores a permit when nobody is waiting, so a push that lands between a drain
/// and the owner's next wait is not lost.
#[derive(Debug, Default)]
pub struct Mailbox {
    queue: VecDeque<Envelope>,
    signal: Arc<Notify>,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Owner-side handle used to wait for new mail
    pub fn handle(&self, client_id: ClientId) -> MailboxHandle {
        MailboxHandle {
            client_id,
            signal: Arc::clone(&self.signal),
        }
    }

    pub fn push(&mut self, envelope: Envelope) {
        self.queue.push_back(envelope);
        self.signal.notify_one();
    }

    /// Take everything queued so far, leaving the mailbox empty.
    pub fn drain(&mut self) -> Vec<Envelope> {
        std::mem::take(&mut self.queue).into()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Wake the owner without queueing anything (used on eviction)
    pub fn wake(&self) {
        self.signal.notify_one();
    }
}

/// Handle held by the session that owns a mailbox.
///
/// Clones share one wake permit: exactly one task per mailbox waits on it.
#[derive(Debug, Clone)]
pub struct MailboxHandle {
    client_id: ClientId,
    signal: Arc<Notify>,
}

impl MailboxHandle {
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Resolve once the mailbox has been pushed to (or woken) since the last wait.
    pub async fn notified(&self) {
        self.signal.notified().await;
    }
}
