//! Persisted table configuration.

use serde::{Deserialize, Serialize};

/// Locations of the persisted API and plugin-binding tables.
///
/// Both files are plain JSON documents, created on first run when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesConfig {
    /// Path of the API table file (endpoint definitions plus group list).
    #[serde(default = "default_api_path")]
    pub api_path: String,
    /// Path of the plugin-binding table file.
    #[serde(default = "default_plugin_path")]
    pub plugin_path: String,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            api_path: default_api_path(),
            plugin_path: default_plugin_path(),
        }
    }
}

fn default_api_path() -> String {
    "./api.json".to_string()
}

fn default_plugin_path() -> String {
    "./plugin.json".to_string()
}
