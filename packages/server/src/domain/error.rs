//! Domain errors.

use thiserror::Error;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("client id must not be empty")]
    EmptyClientId,

    #[error("client id is longer than {max} characters (got {actual})")]
    ClientIdTooLong { max: usize, actual: usize },

    #[error("client id must not contain whitespace")]
    InvalidClientIdCharacter,
}

/// Registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Another live session already owns this id
    #[error("client id '{0}' is already connected")]
    DuplicateClientId(String),
}
