//! UseCase errors.

use thiserror::Error;

use crate::domain::{RegistryError, ValueObjectError};

/// Errors while joining a session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("invalid client id: {0}")]
    InvalidClientId(#[from] ValueObjectError),

    #[error("client id '{0}' is reserved")]
    ReservedClientId(String),

    #[error("client id '{0}' is already connected")]
    DuplicateClientId(String),
}

impl From<RegistryError> for JoinError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::DuplicateClientId(id) => Self::DuplicateClientId(id),
        }
    }
}

/// Errors while leaving a session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaveError {
    #[error("client id '{0}' is not registered")]
    NotRegistered(String),
}
