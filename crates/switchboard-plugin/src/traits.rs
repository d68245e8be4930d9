//! Capability traits: plugins (interceptors) and handlers (custom endpoints).

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use switchboard_core::AppResult;
use switchboard_core::types::{ApiDefinition, OptionSchema, RequestParams, StagedBody};
use switchboard_engine::QueryEngine;

use crate::sink::ResponseSink;

/// What a hook tells the chain executor to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// Continue with the next hook (and the action).
    Continue,
    /// Abort the request immediately; no later hook or action runs.
    Halt,
}

/// Context passed to before- and after-hooks.
///
/// Hooks in one phase run strictly in order and share this context, so a
/// hook may rely on state left by an earlier hook. A halting hook may
/// stage a response of its own; the dispatcher emits it instead of an
/// envelope.
#[derive(Debug)]
pub struct HookContext {
    /// Request method.
    pub method: String,
    /// Request path.
    pub path: String,
    /// Merged request parameters.
    pub params: RequestParams,
    /// The API the request matched, if any.
    pub api: Option<ApiDefinition>,
    /// Response staged by a halting hook.
    pub response: Option<StagedBody>,
}

impl HookContext {
    /// Create a hook context for one request.
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        params: RequestParams,
        api: Option<ApiDefinition>,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            params,
            api,
            response: None,
        }
    }
}

/// A registered plugin: cross-cutting before/after hooks bound to requests
/// through the plugin table.
///
/// Both hooks default to pass-through, so a plugin implements only the
/// phases it cares about. Per-binding options arrive decoded.
#[async_trait]
pub trait Plugin: Send + Sync + 'static {
    /// Unique plugin name, referenced by bindings.
    fn name(&self) -> &str;

    /// Human-readable label for the administration surface.
    fn label(&self) -> &str;

    /// Option schema rendered by the administration console.
    fn options(&self) -> OptionSchema {
        OptionSchema::new()
    }

    /// Runs before the action.
    async fn before(
        &self,
        _ctx: &mut HookContext,
        _options: &Map<String, Value>,
    ) -> AppResult<HookOutcome> {
        Ok(HookOutcome::Continue)
    }

    /// Runs after the action, with the action result when one exists.
    async fn after(
        &self,
        _ctx: &mut HookContext,
        _result: Option<&Value>,
        _options: &Map<String, Value>,
    ) -> AppResult<HookOutcome> {
        Ok(HookOutcome::Continue)
    }
}

/// The request view a handler receives.
#[derive(Debug, Clone, Default)]
pub struct HandlerRequest {
    /// Merged request parameters.
    pub params: Map<String, Value>,
    /// 1-based page number from the query string.
    pub page: Option<u64>,
    /// Page size from the query string.
    pub size: Option<u64>,
}

/// Everything a handler invocation gets to work with.
pub struct HandlerContext<'a> {
    /// Response sink; writes are staged, not sent.
    pub sink: &'a ResponseSink,
    /// The data engine, when one is configured.
    pub engine: Option<Arc<dyn QueryEngine>>,
    /// Request view.
    pub request: HandlerRequest,
    /// Decoded per-API handler options.
    pub options: Map<String, Value>,
}

/// A registered handler: a custom endpoint function referenced by name
/// from the API table.
///
/// The handler owns its output entirely — it stages a structured or plain
/// text body on the sink, and the dispatcher finalizes it once the
/// after-chain has passed.
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    /// Unique handler name, referenced by API definitions.
    fn name(&self) -> &str;

    /// Human-readable label for the administration surface.
    fn label(&self) -> &str;

    /// Option schema rendered by the administration console.
    fn options(&self) -> OptionSchema {
        OptionSchema::new()
    }

    /// Serve one request.
    async fn handle(&self, ctx: HandlerContext<'_>) -> AppResult<()>;
}
