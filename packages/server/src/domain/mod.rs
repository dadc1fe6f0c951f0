//! Domain layer: value objects, entities, the registry abstraction and errors.

pub mod entity;
pub mod error;
pub mod registry;
pub mod value_object;

pub use entity::{Envelope, EnvelopeKind, Mailbox, MailboxHandle};
pub use error::{RegistryError, ValueObjectError};
pub use registry::{ClientRegistry, Delivery, Recipients};
pub use value_object::{ClientId, SERVER_CLIENT_ID, Timestamp};

#[cfg(test)]
pub use registry::MockClientRegistry;
