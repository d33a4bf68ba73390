//! Request and response payloads.

use serde::{Deserialize, Serialize};

use crate::store::SecretMessage;

/// Body of a create request.
#[derive(Debug, Clone, Deserialize)]
pub struct SecretRequest {
    /// Message text to store.
    pub message: String,
}

/// A stored message as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretResponse {
    /// Server-assigned id.
    pub id: i64,
    /// Stored message text.
    pub message: String,
}

impl From<SecretMessage> for SecretResponse {
    fn from(row: SecretMessage) -> Self {
        Self {
            id: row.id,
            message: row.message,
        }
    }
}

/// Query string of the item endpoint.
///
/// `id` stays a string here; parsing happens in the handler so a
/// non-numeric id reads as "absent" rather than as a rejected request.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemQuery {
    /// Id of the requested message.
    pub id: Option<String>,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Human-readable error.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Whether the store answered.
    pub ready: bool,
}
