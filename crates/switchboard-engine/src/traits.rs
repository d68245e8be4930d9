//! Data engine traits.

use async_trait::async_trait;
use serde_json::{Map, Value};

use switchboard_core::AppResult;
use switchboard_core::types::Page;

/// A backing data engine able to open query sessions.
///
/// The dispatcher acquires exactly one session per request and releases it
/// on every exit path, success or failure.
#[async_trait]
pub trait QueryEngine: Send + Sync + 'static {
    /// Open a new session.
    async fn session(&self) -> AppResult<Box<dyn QuerySession>>;
}

/// One session against the data engine.
///
/// Every method takes the full declarative query text; the engine owns
/// parsing and execution. Parameters are the merged request parameters.
#[async_trait]
pub trait QuerySession: Send {
    /// Execute a list fetch, optionally paginated.
    async fn query(
        &mut self,
        text: &str,
        params: &Map<String, Value>,
        page: Option<Page>,
    ) -> AppResult<Value>;

    /// Execute a row count.
    async fn count(&mut self, text: &str, params: &Map<String, Value>) -> AppResult<Value>;

    /// Execute an insert.
    async fn add(&mut self, text: &str, params: &Map<String, Value>) -> AppResult<Value>;

    /// Execute an update.
    async fn update(&mut self, text: &str, params: &Map<String, Value>) -> AppResult<Value>;

    /// Execute a delete.
    async fn delete(&mut self, text: &str, params: &Map<String, Value>) -> AppResult<Value>;

    /// Release the session. Called on every exit path.
    async fn close(&mut self) -> AppResult<()>;
}
