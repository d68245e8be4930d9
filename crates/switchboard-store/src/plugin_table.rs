//! The persisted plugin-binding table.

use std::path::PathBuf;

use tokio::sync::RwLock;
use tracing::info;

use switchboard_core::types::PluginBinding;
use switchboard_core::{AppError, AppResult};

/// Ordered table of plugin bindings, backed by one JSON file.
///
/// Bindings are addressed by position: the table order is the order the
/// interceptor chain runs in. All mutations write through to disk before
/// returning.
#[derive(Debug)]
pub struct PluginTable {
    path: PathBuf,
    inner: RwLock<Vec<PluginBinding>>,
}

impl PluginTable {
    /// Load the table from `path`, creating an empty file when absent.
    pub async fn load(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let bindings: Vec<PluginBinding> = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "plugin table file not found, creating");
                tokio::fs::write(&path, b"[]").await?;
                Vec::new()
            }
            Err(err) => return Err(err.into()),
        };

        info!(path = %path.display(), bindings = bindings.len(), "plugin table loaded");
        Ok(Self {
            path,
            inner: RwLock::new(bindings),
        })
    }

    /// Snapshot the bindings in table order.
    pub async fn list(&self) -> Vec<PluginBinding> {
        let inner = self.inner.read().await;
        inner.clone()
    }

    /// Append a binding.
    pub async fn insert(&self, binding: PluginBinding) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        inner.push(binding);
        self.persist(&inner).await
    }

    /// Replace the binding at `index`.
    pub async fn update(&self, index: usize, binding: PluginBinding) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        if index >= inner.len() {
            return Err(AppError::store(format!("plugin config {index} not exists")));
        }
        inner[index] = binding;
        self.persist(&inner).await
    }

    /// Remove the binding at `index`.
    pub async fn remove(&self, index: usize) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        if index >= inner.len() {
            return Err(AppError::store(format!("plugin config {index} not exists")));
        }
        inner.remove(index);
        self.persist(&inner).await
    }

    async fn persist(&self, bindings: &[PluginBinding]) -> AppResult<()> {
        let bytes = serde_json::to_vec_pretty(bindings)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}
