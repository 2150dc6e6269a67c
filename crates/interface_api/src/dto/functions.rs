//! Server function invocation envelope

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /functions/{name}`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InvokeRequest {
    #[serde(default)]
    pub parameters: Value,
}

/// Outcome of the invocation itself; function failures still report success
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvokeStatus {
    Success,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeResponse {
    pub status: InvokeStatus,
    /// The function payload or `{"error": message}`
    pub response: Value,
}

impl InvokeResponse {
    pub fn success(response: Value) -> Self {
        Self {
            status: InvokeStatus::Success,
            response,
        }
    }
}
