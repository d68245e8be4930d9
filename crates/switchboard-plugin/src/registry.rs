//! Plugin and handler registries.
//!
//! Capabilities are registered explicitly at startup (no dynamic loading)
//! and looked up by name on every request, so a binding created through
//! the administration surface starts working without a restart.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

use switchboard_core::types::OptionSchema;

use crate::traits::{Handler, Plugin};

/// Metadata about a registered capability, listed by the administration
/// surface so the console can render binding forms.
#[derive(Debug, Clone, Serialize)]
pub struct CapabilityInfo {
    /// Unique name.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// Declared option schema.
    pub options: OptionSchema,
}

/// Registry of plugins keyed by name.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: RwLock<HashMap<String, Arc<dyn Plugin>>>,
}

impl PluginRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plugin, replacing any previous plugin of the same name.
    pub async fn register(&self, plugin: Arc<dyn Plugin>) {
        let name = plugin.name().to_string();
        info!(plugin = %name, label = %plugin.label(), "Plugin registered");
        let mut plugins = self.plugins.write().await;
        plugins.insert(name, plugin);
    }

    /// Gets a plugin by name.
    pub async fn get(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        let plugins = self.plugins.read().await;
        plugins.get(name).cloned()
    }

    /// Removes a plugin by name.
    pub async fn unregister(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        let mut plugins = self.plugins.write().await;
        plugins.remove(name)
    }

    /// Lists registered plugin metadata, sorted by name.
    pub async fn list(&self) -> Vec<CapabilityInfo> {
        let plugins = self.plugins.read().await;
        let mut infos: Vec<CapabilityInfo> = plugins
            .values()
            .map(|plugin| CapabilityInfo {
                name: plugin.name().to_string(),
                label: plugin.label().to_string(),
                options: plugin.options(),
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }
}

/// Registry of handlers keyed by name.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: RwLock<HashMap<String, Arc<dyn Handler>>>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler, replacing any previous handler of the same name.
    pub async fn register(&self, handler: Arc<dyn Handler>) {
        let name = handler.name().to_string();
        info!(handler = %name, label = %handler.label(), "Handler registered");
        let mut handlers = self.handlers.write().await;
        handlers.insert(name, handler);
    }

    /// Gets a handler by name.
    pub async fn get(&self, name: &str) -> Option<Arc<dyn Handler>> {
        let handlers = self.handlers.read().await;
        handlers.get(name).cloned()
    }

    /// Lists registered handler metadata, sorted by name.
    pub async fn list(&self) -> Vec<CapabilityInfo> {
        let handlers = self.handlers.read().await;
        let mut infos: Vec<CapabilityInfo> = handlers
            .values()
            .map(|handler| CapabilityInfo {
                name: handler.name().to_string(),
                label: handler.label().to_string(),
                options: handler.options(),
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }
}
