//! Request bodies and raw responses exchanged with the target endpoint.

use crate::{Result, TransportError};
use serde_json::Value;

/// Payload of a probe request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Sent verbatim.
    Raw(String),
    /// Serialized and sent as `application/json`.
    Json(Value),
}

impl RequestBody {
    /// The standard `{"query": ...}` GraphQL request.
    pub fn query(document: impl Into<String>) -> Self {
        Self::Json(serde_json::json!({ "query": document.into() }))
    }
}

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub body: String,
}

impl ProbeResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Parses the body as JSON.
    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.body).map_err(|e| TransportError::Parse(e.to_string()))
    }
}
