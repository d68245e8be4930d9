//! Option schemas declared by plugins and handlers.
//!
//! The administration console renders these schemas as forms; the runtime
//! only decodes the serialized values a binding or API carries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::result::AppResult;

/// Form control used for an option in the administration console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// A group of radio buttons.
    Radio,
    /// A free-text input.
    Text,
    /// A select box over `values`.
    Select,
}

/// Declaration of a single configurable option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSpec {
    /// Label shown next to the control.
    pub label: String,
    /// Control type.
    pub kind: OptionKind,
    /// Candidate values for radio/select controls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    /// Value used when the option is left unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Name of another option this one depends on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dep: Option<String>,
    /// Whether the option must be set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// Option name → declaration, as exposed to the administration surface.
pub type OptionSchema = BTreeMap<String, OptionSpec>;

/// Decode the serialized `options` field of a binding or API definition.
///
/// Absent or blank text decodes to an empty map. Decoding happens once per
/// hook or handler invocation, so edits to a binding take effect on the
/// next request.
pub fn decode_options(serialized: Option<&str>) -> AppResult<Map<String, Value>> {
    match serialized {
        None => Ok(Map::new()),
        Some(text) if text.trim().is_empty() => Ok(Map::new()),
        Some(text) => {
            let value: Value = serde_json::from_str(text)?;
            match value {
                Value::Object(map) => Ok(map),
                _ => Ok(Map::new()),
            }
        }
    }
}
