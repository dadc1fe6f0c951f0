//! Client errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The relay refused the session (policy close), e.g. the id is taken
    #[error("Rejected by relay: {0}")]
    Rejected(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),
}
