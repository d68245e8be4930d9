//! Merged request parameters and pagination.

use serde_json::{Map, Value};

/// Reserved query-string keys that never enter the parameter map.
const RESERVED: [&str; 2] = ["page", "size"];

/// Pagination options handed to the data engine for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Number of rows to skip.
    pub offset: u64,
    /// Number of rows to fetch.
    pub limit: u64,
}

impl Page {
    /// Compute the offset/limit pair from 1-based `page` and `size`.
    pub fn from_page_size(page: u64, size: u64) -> Self {
        Self {
            offset: page.saturating_sub(1) * size,
            limit: size,
        }
    }
}

/// Parameters of one request, as seen by queries, handlers, and hooks.
///
/// `params` merges query-string pairs (minus the reserved `page`/`size`)
/// with the fields of a JSON-object request body; on key collision the
/// body value wins. `page`/`size` are carried separately and only come
/// from the query string.
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    /// Merged key/value parameters.
    pub params: Map<String, Value>,
    /// 1-based page number, when supplied.
    pub page: Option<u64>,
    /// Page size, when supplied.
    pub size: Option<u64>,
}

impl RequestParams {
    /// Build the merged parameter map from decoded query-string pairs and
    /// an optional JSON body.
    ///
    /// Non-object bodies (arrays, scalars) contribute nothing, matching the
    /// behavior of spreading them into an object.
    pub fn from_parts(query_pairs: &[(String, String)], body: Option<&Value>) -> Self {
        let mut params = Map::new();
        let mut page = None;
        let mut size = None;

        for (key, value) in query_pairs {
            match key.as_str() {
                "page" => page = value.parse().ok(),
                "size" => size = value.parse().ok(),
                _ => {
                    params.insert(key.clone(), Value::String(value.clone()));
                }
            }
        }
        debug_assert!(RESERVED.iter().all(|k| !params.contains_key(*k)));

        if let Some(Value::Object(fields)) = body {
            for (key, value) in fields {
                params.insert(key.clone(), value.clone());
            }
        }

        Self { params, page, size }
    }

    /// Pagination options, present only when both `page` and `size` were
    /// supplied.
    pub fn pagination(&self) -> Option<Page> {
        match (self.page, self.size) {
            (Some(page), Some(size)) => Some(Page::from_page_size(page, size)),
            _ => None,
        }
    }
}
