//! Client registry trait.
//!
//! The registry is the source of truth for who is connected. It owns every
//! mailbox, so registration, fan-out and drain all go through it and share one
//! lock. The only implementation lives in
//! `infrastructure::registry::InMemoryClientRegistry`.

use async_trait::async_trait;

use super::{
    entity::{Envelope, MailboxHandle},
    error::RegistryError,
    value_object::ClientId,
};

/// Who an envelope is appended to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipients {
    /// Every registered client except the given one
    AllExcept(ClientId),
    /// Exactly one registered client
    One(ClientId),
}

/// Result of appending an envelope to mailboxes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Number of mailboxes the envelope was appended to
    Delivered(usize),
    /// `Recipients::One` named a client that is not registered
    TargetNotFound,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientRegistry: Send + Sync {
    /// Insert an empty mailbox for `client_id`.
    ///
    /// An id that is already registered is rejected and the existing entry is
    /// left untouched.
    async fn register(&self, client_id: ClientId) -> Result<MailboxHandle, RegistryError>;

    /// Remove the entry. Returns whether it was present.
    async fn unregister(&self, client_id: &ClientId) -> bool;

    /// Owner-side handle of a registered mailbox.
    ///
    /// The handle shares the mailbox's wake signal, so only the owning session
    /// may wait on it; any other waiter would consume the owner's wake-up.
    /// Use [`ClientRegistry::enumerate`] for presence checks.
    async fn lookup(&self, client_id: &ClientId) -> Option<MailboxHandle>;

    /// Snapshot of registered ids, sorted
    async fn enumerate(&self) -> Vec<ClientId>;

    /// Resolve `recipients` and append `envelope` in one critical section.
    async fn deliver(&self, recipients: Recipients, envelope: Envelope) -> Delivery;

    /// Swap the mailbox for an empty one. `None` once `client_id` is gone.
    async fn drain(&self, client_id: &ClientId) -> Option<Vec<Envelope>>;
}
