//! API endpoint definitions.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// One row of the API table: a URL mapped to either declarative query text
/// or a named handler function.
///
/// `url` is the routing key and is matched by exact equality against the
/// request path. Exactly one of `query`/`handler` is expected to be set;
/// when both are present the query text wins, and when neither is present
/// the definition is rejected at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDefinition {
    /// Request path this API serves (exact match).
    pub url: String,
    /// Logical group the API belongs to.
    pub group: String,
    /// Declarative query text, e.g. `"query User: [*]"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Name of a registered handler function.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
    /// Serialized per-API handler options (JSON object text).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    /// Free-form comment shown in the administration surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// The execution strategy an [`ApiDefinition`] resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiAction<'a> {
    /// Run the declarative query text through the data engine.
    Query(&'a str),
    /// Invoke the named handler from the handler registry.
    Handler(&'a str),
}

impl ApiDefinition {
    /// Resolve which execution strategy this definition uses.
    ///
    /// Fails with a misconfigured-api error when neither field is set.
    pub fn action(&self) -> AppResult<ApiAction<'_>> {
        if let Some(query) = self.query.as_deref() {
            return Ok(ApiAction::Query(query));
        }
        if let Some(handler) = self.handler.as_deref() {
            return Ok(ApiAction::Handler(handler));
        }
        Err(AppError::misconfigured_api(&self.url))
    }
}
