//! Data engine configuration.

use serde::{Deserialize, Serialize};

/// Data engine selection.
///
/// `"none"` runs the server without a backing engine: handler APIs work,
/// declarative APIs fail with the engine-unavailable envelope. `"memory"`
/// wires the in-process engine, useful for demos and local development.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Engine provider: `"none"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
        }
    }
}

fn default_provider() -> String {
    "none".to_string()
}
