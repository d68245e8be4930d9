//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Map, Value};
use tower::ServiceExt;

use switchboard_api::AppState;
use switchboard_core::AppResult;
use switchboard_core::config::AppConfig;
use switchboard_engine::memory::MemoryEngine;
use switchboard_plugin::{
    Handler, HandlerContext, HandlerRegistry, HookContext, HookOutcome, Plugin, PluginRegistry,
};
use switchboard_store::{ApiTable, PluginTable};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The API table backing the router
    pub apis: Arc<ApiTable>,
    /// The plugin-binding table backing the router
    pub bindings: Arc<PluginTable>,
    /// Registered plugins
    pub plugins: Arc<PluginRegistry>,
    /// Registered handlers
    pub handlers: Arc<HandlerRegistry>,
    /// The in-memory engine, when configured
    pub engine: Option<Arc<MemoryEngine>>,
    _dir: tempfile::TempDir,
}

impl TestApp {
    /// App with a seeded-empty in-memory engine and the admin surface on.
    pub async fn new() -> Self {
        Self::build(true, true).await
    }

    /// App with no data engine configured.
    pub async fn without_engine() -> Self {
        Self::build(false, true).await
    }

    /// App with the admin surface disabled.
    pub async fn without_admin() -> Self {
        Self::build(true, false).await
    }

    async fn build(with_engine: bool, admin: bool) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let apis = Arc::new(
            ApiTable::load(dir.path().join("api.json"))
                .await
                .expect("load api table"),
        );
        let bindings = Arc::new(
            PluginTable::load(dir.path().join("plugin.json"))
                .await
                .expect("load plugin table"),
        );
        let plugins = Arc::new(PluginRegistry::new());
        let handlers = Arc::new(HandlerRegistry::new());
        let engine = with_engine.then(|| Arc::new(MemoryEngine::new()));

        let mut config = AppConfig::default();
        config.server.admin = admin;

        let state = AppState {
            config: Arc::new(config),
            apis: Arc::clone(&apis),
            bindings: Arc::clone(&bindings),
            plugins: Arc::clone(&plugins),
            handlers: Arc::clone(&handlers),
            engine: engine
                .as_ref()
                .map(|engine| Arc::clone(engine) as Arc<dyn switchboard_engine::QueryEngine>),
        };

        Self {
            router: switchboard_api::build_router(state),
            apis,
            bindings,
            plugins,
            handlers,
            engine,
            _dir: dir,
        }
    }

    /// Seed the in-memory engine with rows for an entity.
    pub async fn seed(&self, entity: &str, rows: Vec<Value>) {
        self.engine
            .as_ref()
            .expect("engine not configured")
            .seed(entity, rows)
            .await;
    }

    /// Send one request through the router.
    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).expect("serialize body"))
            }
            None => Body::empty(),
        };
        let request = builder.body(body).expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("send request");

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read response body");
        let text = String::from_utf8_lossy(&bytes).to_string();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            content_type,
            body,
            text,
        }
    }
}

/// A response captured by [`TestApp::request`].
pub struct TestResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Content-type header value.
    pub content_type: String,
    /// Body parsed as JSON, `Null` when not JSON.
    pub body: Value,
    /// Raw body text.
    pub text: String,
}

/// Plugin that records hook invocations and returns fixed outcomes.
pub struct RecordingPlugin {
    name: String,
    before_outcome: HookOutcome,
    after_outcome: HookOutcome,
    events: Arc<Mutex<Vec<String>>>,
}

impl RecordingPlugin {
    /// Both hooks continue.
    pub fn continuing(name: &str) -> Arc<Self> {
        Self::with_outcomes(name, HookOutcome::Continue, HookOutcome::Continue)
    }

    /// The before-hook short-circuits.
    pub fn halting_before(name: &str) -> Arc<Self> {
        Self::with_outcomes(name, HookOutcome::Halt, HookOutcome::Continue)
    }

    /// The after-hook short-circuits.
    pub fn halting_after(name: &str) -> Arc<Self> {
        Self::with_outcomes(name, HookOutcome::Continue, HookOutcome::Halt)
    }

    fn with_outcomes(name: &str, before: HookOutcome, after: HookOutcome) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            before_outcome: before,
            after_outcome: after,
            events: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Snapshot of the recorded hook invocations.
    pub fn events(&self) -> Vec<String> {
        self.events.lock().expect("events lock").clone()
    }
}

#[async_trait]
impl Plugin for RecordingPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn label(&self) -> &str {
        &self.name
    }

    async fn before(
        &self,
        _ctx: &mut HookContext,
        _options: &Map<String, Value>,
    ) -> AppResult<HookOutcome> {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("{}:before", self.name));
        Ok(self.before_outcome)
    }

    async fn after(
        &self,
        _ctx: &mut HookContext,
        result: Option<&Value>,
        _options: &Map<String, Value>,
    ) -> AppResult<HookOutcome> {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("{}:after[{}]", self.name, result.is_some()));
        Ok(self.after_outcome)
    }
}

/// Handler that stages a fixed plain-text body.
pub struct TextHandler;

#[async_trait]
impl Handler for TextHandler {
    fn name(&self) -> &str {
        "text"
    }

    fn label(&self) -> &str {
        "Plain text"
    }

    async fn handle(&self, ctx: HandlerContext<'_>) -> AppResult<()> {
        ctx.sink.text("hello");
        Ok(())
    }
}

/// Handler that stages nothing at all.
pub struct SilentHandler;

#[async_trait]
impl Handler for SilentHandler {
    fn name(&self) -> &str {
        "silent"
    }

    fn label(&self) -> &str {
        "Silent"
    }

    async fn handle(&self, _ctx: HandlerContext<'_>) -> AppResult<()> {
        Ok(())
    }
}

/// Handler that stages its request view and options, for asserting what
/// the dispatcher passed in.
pub struct ProbeHandler;

#[async_trait]
impl Handler for ProbeHandler {
    fn name(&self) -> &str {
        "probe"
    }

    fn label(&self) -> &str {
        "Probe"
    }

    async fn handle(&self, ctx: HandlerContext<'_>) -> AppResult<()> {
        ctx.sink.json(serde_json::json!({
            "params": Value::Object(ctx.request.params),
            "page": ctx.request.page,
            "size": ctx.request.size,
            "options": Value::Object(ctx.options),
            "hasEngine": ctx.engine.is_some(),
        }));
        Ok(())
    }
}
