//! In-memory data engine.
//!
//! A reference [`QueryEngine`] backed by per-entity row vectors. It is not
//! a query-language implementation: it reads the entity name after the
//! operation keyword and matches rows by parameter equality. Good enough
//! for tests and local demos; a real deployment supplies its own engine.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tokio::sync::RwLock;
use tracing::debug;

use switchboard_core::types::Page;
use switchboard_core::{AppError, AppResult};

use crate::traits::{QueryEngine, QuerySession};

type Tables = Arc<RwLock<HashMap<String, Vec<Value>>>>;

/// In-process data engine keyed by entity name.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    tables: Tables,
}

impl MemoryEngine {
    /// Creates an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entity with rows, replacing any existing rows.
    pub async fn seed(&self, entity: &str, rows: Vec<Value>) {
        let mut tables = self.tables.write().await;
        tables.insert(entity.to_string(), rows);
    }

    /// Snapshot the rows of an entity.
    pub async fn rows(&self, entity: &str) -> Vec<Value> {
        let tables = self.tables.read().await;
        tables.get(entity).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl QueryEngine for MemoryEngine {
    async fn session(&self) -> AppResult<Box<dyn QuerySession>> {
        Ok(Box::new(MemorySession {
            tables: Arc::clone(&self.tables),
        }))
    }
}

struct MemorySession {
    tables: Tables,
}

/// Entity name: the token after the operation keyword, up to the first
/// non-alphanumeric character (`"query User: [*]"` → `"User"`).
fn entity_of(text: &str) -> AppResult<String> {
    let mut tokens = text.split_whitespace();
    let _op = tokens.next().ok_or_else(|| AppError::invalid_query(text))?;
    let raw = tokens.next().ok_or_else(|| AppError::invalid_query(text))?;
    let entity: String = raw.chars().take_while(|c| c.is_alphanumeric()).collect();
    if entity.is_empty() {
        return Err(AppError::invalid_query(text));
    }
    Ok(entity)
}

/// Loose equality: query-string parameters arrive as strings, rows may
/// hold numbers or booleans.
fn matches_param(row_value: Option<&Value>, param_value: &Value) -> bool {
    let Some(row_value) = row_value else {
        return false;
    };
    if row_value == param_value {
        return true;
    }
    match param_value {
        Value::String(text) => match row_value {
            Value::Number(n) => n.to_string() == *text,
            Value::Bool(b) => b.to_string() == *text,
            _ => false,
        },
        _ => false,
    }
}

fn row_matches(row: &Value, params: &Map<String, Value>) -> bool {
    params
        .iter()
        .all(|(key, value)| matches_param(row.get(key), value))
}

#[async_trait]
impl QuerySession for MemorySession {
    async fn query(
        &mut self,
        text: &str,
        params: &Map<String, Value>,
        page: Option<Page>,
    ) -> AppResult<Value> {
        let entity = entity_of(text)?;
        let tables = self.tables.read().await;
        let mut rows: Vec<Value> = tables
            .get(&entity)
            .map(|rows| {
                rows.iter()
                    .filter(|row| row_matches(row, params))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(page) = page {
            let offset = page.offset.min(rows.len() as u64) as usize;
            let end = (page.offset + page.limit).min(rows.len() as u64) as usize;
            rows = rows[offset..end].to_vec();
        }

        debug!(entity = %entity, rows = rows.len(), "memory query");
        Ok(Value::Array(rows))
    }

    async fn count(&mut self, text: &str, params: &Map<String, Value>) -> AppResult<Value> {
        let entity = entity_of(text)?;
        let tables = self.tables.read().await;
        let count = tables
            .get(&entity)
            .map(|rows| rows.iter().filter(|row| row_matches(row, params)).count())
            .unwrap_or(0);
        Ok(json!(count))
    }

    async fn add(&mut self, text: &str, params: &Map<String, Value>) -> AppResult<Value> {
        let entity = entity_of(text)?;
        let row = Value::Object(params.clone());
        let mut tables = self.tables.write().await;
        tables.entry(entity).or_default().push(row.clone());
        Ok(row)
    }

    async fn update(&mut self, text: &str, params: &Map<String, Value>) -> AppResult<Value> {
        let entity = entity_of(text)?;
        let Some(id) = params.get("id") else {
            return Ok(json!(0));
        };
        let mut tables = self.tables.write().await;
        let mut affected = 0u64;
        if let Some(rows) = tables.get_mut(&entity) {
            for row in rows.iter_mut() {
                if matches_param(row.get("id"), id) {
                    if let Value::Object(fields) = row {
                        for (key, value) in params {
                            fields.insert(key.clone(), value.clone());
                        }
                        affected += 1;
                    }
                }
            }
        }
        Ok(json!(affected))
    }

    async fn delete(&mut self, text: &str, params: &Map<String, Value>) -> AppResult<Value> {
        let entity = entity_of(text)?;
        let mut tables = self.tables.write().await;
        let mut removed = 0u64;
        if let Some(rows) = tables.get_mut(&entity) {
            let before = rows.len();
            rows.retain(|row| !row_matches(row, params));
            removed = (before - rows.len()) as u64;
        }
        Ok(json!(removed))
    }

    async fn close(&mut self) -> AppResult<()> {
        Ok(())
    }
}
