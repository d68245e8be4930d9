//! The request dispatcher.
//!
//! Runs as a middleware in front of the whole router and drives one
//! request through the pipeline:
//!
//! ```text
//! match api (exact url) → resolve bindings → before-chain
//!     → fall through | declarative action | handler action
//!     → after-chain → respond
//! ```
//!
//! Any hook failure or short-circuit exits the pipeline immediately. The
//! API and plugin tables are read live at each step, so administrative
//! edits take effect on the next request without a restart.

use axum::Json;
use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tracing::debug;

use switchboard_core::types::{
    ApiAction, ApiDefinition, Envelope, PluginBinding, RequestParams, StagedBody, decode_options,
};
use switchboard_core::{AppError, AppResult};
use switchboard_engine::Operation;
use switchboard_plugin::{
    ChainExecutor, ChainOutcome, HandlerContext, HandlerRequest, HookContext, ResponseSink,
    resolve,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Largest request body the dispatcher will buffer.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Dispatcher middleware: serve the request from the API table, or pass it
/// to the inner router.
pub async fn dispatch(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    // Admin routes take precedence over the api table.
    if state.config.server.admin && request.uri().path().starts_with("/_edit") {
        return next.run(request).await;
    }

    let (parts, body) = request.into_parts();
    let method = parts.method.to_string();
    let path = parts.uri.path().to_string();

    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => {
            return ApiError(AppError::internal(format!("failed to read body: {err}")))
                .into_response();
        }
    };
    let body_json: Option<Value> = if bytes.is_empty() {
        None
    } else {
        serde_json::from_slice(&bytes).ok()
    };

    let query_pairs: Vec<(String, String)> = parts
        .uri
        .query()
        .and_then(|query| serde_urlencoded::from_str(query).ok())
        .unwrap_or_default();
    let params = RequestParams::from_parts(&query_pairs, body_json.as_ref());

    let api = state.apis.find(&path).await;
    let bindings = state.bindings.list().await;
    let resolved = resolve(&bindings, &path, api.as_ref());

    debug!(
        method = %method,
        path = %path,
        matched = api.is_some(),
        bindings = resolved.len(),
        "dispatching"
    );

    let executor = ChainExecutor::new(&state.plugins);
    let mut ctx = HookContext::new(method, path, params.clone(), api.clone());

    match executor.run_before(&resolved, &mut ctx).await {
        Ok(ChainOutcome::Completed) => {}
        // A halting plugin owns the response; emit whatever it staged.
        Ok(ChainOutcome::Halted) => return staged_response(ctx.response),
        Err(err) => return ApiError(err).into_response(),
    }

    let Some(api) = api else {
        // No API for this path: hand the request back to the inner router.
        let request = Request::from_parts(parts, Body::from(bytes));
        return next.run(request).await;
    };

    match api.action() {
        Ok(ApiAction::Query(text)) => {
            let text = text.to_string();
            let result = match run_query(&state, &text, &params).await {
                Ok(result) => result,
                Err(err) => return ApiError(err).into_response(),
            };
            match executor.run_after(&resolved, &mut ctx, Some(&result)).await {
                Ok(ChainOutcome::Completed) => Json(Envelope::ok(Some(result))).into_response(),
                Ok(ChainOutcome::Halted) => StatusCode::NO_CONTENT.into_response(),
                Err(err) => ApiError(err).into_response(),
            }
        }
        Ok(ApiAction::Handler(name)) => {
            let name = name.to_string();
            run_handler(&state, &executor, &resolved, &mut ctx, &api, &name, &params).await
        }
        Err(err) => ApiError(err).into_response(),
    }
}

/// Declarative path: one session per request, released on every exit.
async fn run_query(state: &AppState, text: &str, params: &RequestParams) -> AppResult<Value> {
    let engine = state
        .engine
        .as_ref()
        .ok_or_else(AppError::engine_unavailable)?;
    let op = Operation::parse(text)?;

    let mut session = engine.session().await?;
    let result = match op {
        Operation::Query => {
            session
                .query(text, &params.params, params.pagination())
                .await
        }
        Operation::Count => session.count(text, &params.params).await,
        Operation::Add => session.add(text, &params.params).await,
        Operation::Update => session.update(text, &params.params).await,
        Operation::Delete => session.delete(text, &params.params).await,
    };
    let closed = session.close().await;

    let value = result?;
    closed?;
    Ok(value)
}

/// Handler path: the handler stages output on the sink; the after-chain
/// gates the staged bytes before anything is emitted.
async fn run_handler(
    state: &AppState,
    executor: &ChainExecutor<'_>,
    resolved: &[PluginBinding],
    ctx: &mut HookContext,
    api: &ApiDefinition,
    name: &str,
    params: &RequestParams,
) -> Response {
    let Some(handler) = state.handlers.get(name).await else {
        return ApiError(AppError::handler_not_found(name)).into_response();
    };
    let options = match decode_options(api.options.as_deref()) {
        Ok(options) => options,
        Err(err) => return ApiError(err).into_response(),
    };

    let sink = ResponseSink::new();
    let outcome = handler
        .handle(HandlerContext {
            sink: &sink,
            engine: state.engine.clone(),
            request: HandlerRequest {
                params: params.params.clone(),
                page: params.page,
                size: params.size,
            },
            options,
        })
        .await;
    if let Err(err) = outcome {
        return ApiError(err).into_response();
    }

    // The after-chain only runs when the handler actually wrote something,
    // mirroring the write-gated contract.
    match sink.take() {
        Some(staged) => match executor.run_after(resolved, ctx, None).await {
            Ok(ChainOutcome::Completed) => staged_response(Some(staged)),
            Ok(ChainOutcome::Halted) => StatusCode::NO_CONTENT.into_response(),
            Err(err) => ApiError(err).into_response(),
        },
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Emit a staged body verbatim, or an empty response when nothing was
/// staged.
fn staged_response(staged: Option<StagedBody>) -> Response {
    match staged {
        Some(StagedBody::Json(value)) => Json(value).into_response(),
        Some(StagedBody::Text(text)) => text.into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
