//! The persisted API table.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use switchboard_core::types::ApiDefinition;
use switchboard_core::{AppError, AppResult};

/// On-disk shape of the API table file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ApiTableFile {
    /// Known group names.
    #[serde(default)]
    groups: Vec<String>,
    /// Ordered API definitions.
    #[serde(default)]
    apis: Vec<ApiDefinition>,
}

/// Ordered table of API definitions plus the group list, backed by one
/// JSON file.
///
/// `url` is the unique key. All mutations write through to disk before
/// returning.
#[derive(Debug)]
pub struct ApiTable {
    path: PathBuf,
    inner: RwLock<ApiTableFile>,
}

impl ApiTable {
    /// Load the table from `path`, creating an empty file when absent.
    pub async fn load(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let file = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "api table file not found, creating");
                let empty = ApiTableFile::default();
                tokio::fs::write(&path, serde_json::to_vec_pretty(&empty)?).await?;
                empty
            }
            Err(err) => return Err(err.into()),
        };

        info!(
            path = %path.display(),
            apis = file.apis.len(),
            groups = file.groups.len(),
            "api table loaded"
        );
        Ok(Self {
            path,
            inner: RwLock::new(file),
        })
    }

    /// Find the API whose url equals `url` exactly.
    pub async fn find(&self, url: &str) -> Option<ApiDefinition> {
        let inner = self.inner.read().await;
        inner.apis.iter().find(|api| api.url == url).cloned()
    }

    /// Snapshot the API list in table order.
    pub async fn list(&self) -> Vec<ApiDefinition> {
        let inner = self.inner.read().await;
        inner.apis.clone()
    }

    /// Append a new API. Fails when the url is already taken.
    pub async fn insert(&self, api: ApiDefinition) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        if inner.apis.iter().any(|existing| existing.url == api.url) {
            return Err(AppError::store(format!("api {} exists", api.url)));
        }
        inner.apis.push(api);
        self.persist(&inner).await
    }

    /// Replace the API at `url`. Fails when no such API exists.
    pub async fn update(&self, url: &str, api: ApiDefinition) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        let Some(index) = inner.apis.iter().position(|existing| existing.url == url) else {
            return Err(AppError::store(format!("api {url} not exists")));
        };
        inner.apis[index] = api;
        self.persist(&inner).await
    }

    /// Remove the API at `url`. Fails when no such API exists.
    pub async fn remove(&self, url: &str) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        let Some(index) = inner.apis.iter().position(|existing| existing.url == url) else {
            return Err(AppError::store(format!("api {url} not exists")));
        };
        inner.apis.remove(index);
        self.persist(&inner).await
    }

    /// Snapshot the group list.
    pub async fn groups(&self) -> Vec<String> {
        let inner = self.inner.read().await;
        inner.groups.clone()
    }

    /// Add a group name. Fails on duplicates.
    pub async fn add_group(&self, name: &str) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        if inner.groups.iter().any(|group| group == name) {
            return Err(AppError::store(format!("group {name} exists")));
        }
        inner.groups.push(name.to_string());
        self.persist(&inner).await
    }

    /// Rename a group, rewriting the group of every API that used it.
    pub async fn rename_group(&self, old: &str, new: &str) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        let Some(index) = inner.groups.iter().position(|group| group == old) else {
            return Err(AppError::store(format!("group {old} not exists")));
        };
        if inner.groups.iter().any(|group| group == new) {
            return Err(AppError::store(format!("group {new} exists")));
        }
        inner.groups[index] = new.to_string();
        for api in inner.apis.iter_mut().filter(|api| api.group == old) {
            api.group = new.to_string();
        }
        self.persist(&inner).await
    }

    /// Remove a group. Fails while any API still references it.
    pub async fn remove_group(&self, name: &str) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        let Some(index) = inner.groups.iter().position(|group| group == name) else {
            return Err(AppError::store(format!("group {name} not exists")));
        };
        if inner.apis.iter().any(|api| api.group == name) {
            return Err(AppError::store(format!("group {name} has api")));
        }
        inner.groups.remove(index);
        self.persist(&inner).await
    }

    async fn persist(&self, file: &ApiTableFile) -> AppResult<()> {
        let bytes = serde_json::to_vec_pretty(file)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(url: &str, group: &str) -> ApiDefinition {
        ApiDefinition {
            url: url.to_string(),
            group: group.to_string(),
            query: Some("query User: [*]".to_string()),
            handler: None,
            options: None,
            comment: None,
        }
    }

    async fn table() -> (tempfile::TempDir, ApiTable) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let table = ApiTable::load(dir.path().join("api.json"))
            .await
            .expect("load table");
        (dir, table)
    }

    #[tokio::test]
    async fn missing_file_is_created_empty() {
        let (_dir, table) = table().await;
        assert!(table.list().await.is_empty());
        assert!(table.groups().await.is_empty());
    }

    #[tokio::test]
    async fn mutations_survive_a_reload() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("api.json");

        let table = ApiTable::load(&path).await.unwrap();
        table.add_group("g1").await.unwrap();
        table.insert(api("/users", "g1")).await.unwrap();

        let reloaded = ApiTable::load(&path).await.unwrap();
        assert_eq!(reloaded.groups().await, vec!["g1".to_string()]);
        assert_eq!(reloaded.find("/users").await.unwrap().group, "g1");
    }

    #[tokio::test]
    async fn find_is_exact_match_only() {
        let (_dir, table) = table().await;
        table.insert(api("/users", "g1")).await.unwrap();
        assert!(table.find("/users").await.is_some());
        assert!(table.find("/users/1").await.is_none());
        assert!(table.find("/user").await.is_none());
    }

    #[tokio::test]
    async fn duplicate_url_is_rejected() {
        let (_dir, table) = table().await;
        table.insert(api("/users", "g1")).await.unwrap();
        let err = table.insert(api("/users", "g2")).await.unwrap_err();
        assert_eq!(err.message, "api /users exists");
    }

    #[tokio::test]
    async fn group_rename_rewrites_apis() {
        let (_dir, table) = table().await;
        table.add_group("g1").await.unwrap();
        table.insert(api("/users", "g1")).await.unwrap();

        table.rename_group("g1", "accounts").await.unwrap();
        assert_eq!(table.find("/users").await.unwrap().group, "accounts");
    }

    #[tokio::test]
    async fn group_with_apis_cannot_be_removed() {
        let (_dir, table) = table().await;
        table.add_group("g1").await.unwrap();
        table.insert(api("/users", "g1")).await.unwrap();

        let err = table.remove_group("g1").await.unwrap_err();
        assert_eq!(err.message, "group g1 has api");

        table.remove("/users").await.unwrap();
        table.remove_group("g1").await.unwrap();
        assert!(table.groups().await.is_empty());
    }
}
