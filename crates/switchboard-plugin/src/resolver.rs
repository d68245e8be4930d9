//! Plugin-binding resolution.

use glob::Pattern;

use switchboard_core::types::{ApiDefinition, MatchType, PluginBinding};

/// Return the subset of `bindings` that applies to a request, in table
/// (insertion) order.
///
/// A url-type binding applies when its glob pattern accepts the request
/// path; an invalid pattern never matches. A group-type binding applies
/// only when an API matched the path and its group equals the binding's
/// value — group bindings never fire for unmatched paths. `weight` does
/// not participate in ordering.
pub fn resolve(
    bindings: &[PluginBinding],
    path: &str,
    api: Option<&ApiDefinition>,
) -> Vec<PluginBinding> {
    bindings
        .iter()
        .filter(|binding| applies(binding, path, api))
        .cloned()
        .collect()
}

fn applies(binding: &PluginBinding, path: &str, api: Option<&ApiDefinition>) -> bool {
    match binding.match_type {
        MatchType::Url => Pattern::new(&binding.match_value)
            .map(|pattern| pattern.matches(path))
            .unwrap_or(false),
        MatchType::Group => api.is_some_and(|api| api.group == binding.match_value),
    }
}
