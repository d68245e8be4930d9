//! The `/_edit` administration surface.
//!
//! CRUD over the API table, its group list, and the plugin-binding table,
//! plus read-only listings of the registered plugins and handlers for the
//! console to render binding forms from. Every mutation writes through to
//! the persisted files and is visible to the very next dispatched request.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;

use switchboard_core::AppError;
use switchboard_core::types::{ApiDefinition, Envelope, PluginBinding};

use crate::error::ApiError;
use crate::state::AppState;

type AdminResult = Result<Json<Envelope>, ApiError>;

/// Wildcard-captured API urls may arrive without their leading slash.
fn full_url(raw: &str) -> String {
    if raw.starts_with('/') {
        raw.to_string()
    } else {
        format!("/{raw}")
    }
}

fn ok_with(data: impl serde::Serialize) -> AdminResult {
    let value = serde_json::to_value(data).map_err(AppError::from)?;
    Ok(Json(Envelope::ok(Some(value))))
}

fn ok_empty() -> AdminResult {
    Ok(Json(Envelope::ok(None)))
}

/// GET /_edit/apis
pub async fn list_apis(State(state): State<AppState>) -> AdminResult {
    ok_with(state.apis.list().await)
}

/// POST /_edit/apis
pub async fn create_api(
    State(state): State<AppState>,
    Json(api): Json<ApiDefinition>,
) -> AdminResult {
    state.apis.insert(api).await?;
    ok_empty()
}

/// PUT /_edit/apis/{*url}
pub async fn update_api(
    State(state): State<AppState>,
    Path(url): Path<String>,
    Json(api): Json<ApiDefinition>,
) -> AdminResult {
    state.apis.update(&full_url(&url), api).await?;
    ok_empty()
}

/// DELETE /_edit/apis/{*url}
pub async fn delete_api(State(state): State<AppState>, Path(url): Path<String>) -> AdminResult {
    state.apis.remove(&full_url(&url)).await?;
    ok_empty()
}

/// Payload naming a group.
#[derive(Debug, Deserialize)]
pub struct GroupPayload {
    /// The group name.
    pub name: String,
}

/// GET /_edit/apiGroups
pub async fn list_groups(State(state): State<AppState>) -> AdminResult {
    ok_with(state.apis.groups().await)
}

/// POST /_edit/apiGroups
pub async fn create_group(
    State(state): State<AppState>,
    Json(payload): Json<GroupPayload>,
) -> AdminResult {
    state.apis.add_group(&payload.name).await?;
    ok_empty()
}

/// PUT /_edit/apiGroups/{name}
pub async fn rename_group(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(payload): Json<GroupPayload>,
) -> AdminResult {
    state.apis.rename_group(&name, &payload.name).await?;
    ok_empty()
}

/// DELETE /_edit/apiGroups/{name}
pub async fn delete_group(State(state): State<AppState>, Path(name): Path<String>) -> AdminResult {
    state.apis.remove_group(&name).await?;
    ok_empty()
}

/// GET /_edit/plugins
pub async fn list_plugins(State(state): State<AppState>) -> AdminResult {
    ok_with(state.plugins.list().await)
}

/// GET /_edit/handlers
pub async fn list_handlers(State(state): State<AppState>) -> AdminResult {
    ok_with(state.handlers.list().await)
}

/// GET /_edit/pluginConfigs
pub async fn list_bindings(State(state): State<AppState>) -> AdminResult {
    ok_with(state.bindings.list().await)
}

/// POST /_edit/pluginConfigs
pub async fn create_binding(
    State(state): State<AppState>,
    Json(binding): Json<PluginBinding>,
) -> AdminResult {
    state.bindings.insert(binding).await?;
    ok_empty()
}

/// PUT /_edit/pluginConfigs/{index}
pub async fn update_binding(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(binding): Json<PluginBinding>,
) -> AdminResult {
    state.bindings.update(index, binding).await?;
    ok_empty()
}

/// DELETE /_edit/pluginConfigs/{index}
pub async fn delete_binding(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> AdminResult {
    state.bindings.remove(index).await?;
    ok_empty()
}
