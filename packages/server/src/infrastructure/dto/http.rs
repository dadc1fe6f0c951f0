//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Response body of `GET /api/clients`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedClientsDto {
    /// Connected client ids, sorted
    pub clients: Vec<String>,
}
