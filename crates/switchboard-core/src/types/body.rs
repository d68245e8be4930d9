//! Staged response bodies.

use serde_json::Value;

/// A response body staged by a handler or a short-circuiting plugin.
///
/// Staging is side-effect free; nothing goes on the wire until the
/// dispatcher finalizes the request after the after-chain has run.
#[derive(Debug, Clone, PartialEq)]
pub enum StagedBody {
    /// Structured data, sent as JSON.
    Json(Value),
    /// Plain text, sent verbatim.
    Text(String),
}
