//! Application state shared across the dispatcher and all handlers.

use std::sync::Arc;

use switchboard_core::config::AppConfig;
use switchboard_engine::QueryEngine;
use switchboard_plugin::{HandlerRegistry, PluginRegistry};
use switchboard_store::{ApiTable, PluginTable};

/// Application state containing all shared dependencies.
///
/// Passed to the dispatcher middleware and every admin handler via Axum's
/// `State` extractor. All fields are `Arc`-wrapped for cheap cloning
/// across tasks; there are no process-wide singletons, so tests construct
/// isolated states with synthetic tables.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The persisted API table.
    pub apis: Arc<ApiTable>,
    /// The persisted plugin-binding table.
    pub bindings: Arc<PluginTable>,
    /// Registered plugins.
    pub plugins: Arc<PluginRegistry>,
    /// Registered handlers.
    pub handlers: Arc<HandlerRegistry>,
    /// The data engine, when one is configured.
    pub engine: Option<Arc<dyn QueryEngine>>,
}
