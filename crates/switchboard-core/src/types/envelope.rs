//! The response envelope wire contract.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Standard response envelope.
///
/// Success: `{"success": true, "data": …}` with `data` omitted when absent.
/// Failure: `{"success": false, "msg": …}`. The envelope shape, not the
/// HTTP status code, is the contract consumed by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Whether the request was successful.
    pub success: bool,
    /// Response payload on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Error message on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl Envelope {
    /// Creates a successful envelope.
    pub fn ok(data: Option<Value>) -> Self {
        Self {
            success: true,
            data,
            msg: None,
        }
    }

    /// Creates a failure envelope.
    pub fn fail(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            msg: Some(msg.into()),
        }
    }
}
