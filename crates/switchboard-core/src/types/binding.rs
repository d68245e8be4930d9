//! Plugin bindings: persisted rules attaching a registered plugin to requests.

use serde::{Deserialize, Serialize};

/// How a [`PluginBinding`] is matched against a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Match the group of the API the request resolved to.
    Group,
    /// Match the request path against a glob pattern.
    Url,
}

/// One row of the plugin table.
///
/// `name` must reference a registered plugin; a binding whose plugin is
/// missing aborts the request at hook time. Bindings run in table order;
/// `weight` is persisted for forward compatibility but does not influence
/// ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginBinding {
    /// Name of the registered plugin this binding invokes.
    pub name: String,
    /// Whether `match_value` is a group name or a URL pattern.
    pub match_type: MatchType,
    /// Exact group name, or glob pattern over the request path.
    pub match_value: String,
    /// Serialized per-binding options (JSON object text).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    /// Ordering hint, currently unused.
    #[serde(default)]
    pub weight: i32,
    /// Free-form comment shown in the administration surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MatchType::Group).unwrap(), "\"group\"");
        assert_eq!(serde_json::to_string(&MatchType::Url).unwrap(), "\"url\"");
    }

    #[test]
    fn weight_defaults_to_zero() {
        let binding: PluginBinding = serde_json::from_str(
            r#"{"name":"log","matchType":"url","matchValue":"/api/*"}"#,
        )
        .unwrap();
        assert_eq!(binding.weight, 0);
        assert_eq!(binding.match_type, MatchType::Url);
    }
}
