//! Built-in capabilities shipped with the server binary.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::info;

use switchboard_core::AppResult;
use switchboard_core::types::{OptionKind, OptionSchema, OptionSpec};

use crate::traits::{
    Handler, HandlerContext, HookContext, HookOutcome, Plugin,
};

/// Request logging plugin.
///
/// Logs every request it is bound to, before the action; logging after
/// the action is opt-in through the `showAfter` binding option.
#[derive(Debug, Default)]
pub struct LogPlugin;

#[async_trait]
impl Plugin for LogPlugin {
    fn name(&self) -> &str {
        "log"
    }

    fn label(&self) -> &str {
        "Request log"
    }

    fn options(&self) -> OptionSchema {
        let mut schema = OptionSchema::new();
        schema.insert(
            "showAfter".to_string(),
            OptionSpec {
                label: "Log after the action".to_string(),
                kind: OptionKind::Select,
                values: Some(vec!["true".to_string(), "false".to_string()]),
                default_value: Some("false".to_string()),
                dep: None,
                required: None,
            },
        );
        schema
    }

    async fn before(
        &self,
        ctx: &mut HookContext,
        _options: &Map<String, Value>,
    ) -> AppResult<HookOutcome> {
        info!(method = %ctx.method, path = %ctx.path, "before");
        Ok(HookOutcome::Continue)
    }

    async fn after(
        &self,
        ctx: &mut HookContext,
        result: Option<&Value>,
        options: &Map<String, Value>,
    ) -> AppResult<HookOutcome> {
        if options.get("showAfter").and_then(Value::as_str) == Some("true") {
            info!(
                method = %ctx.method,
                path = %ctx.path,
                has_result = result.is_some(),
                "after"
            );
        }
        Ok(HookOutcome::Continue)
    }
}

/// Reference handler: stages the merged request parameters back as
/// structured data. Stands in for project-specific handler functions.
#[derive(Debug, Default)]
pub struct EchoHandler;

#[async_trait]
impl Handler for EchoHandler {
    fn name(&self) -> &str {
        "echo"
    }

    fn label(&self) -> &str {
        "Echo parameters"
    }

    async fn handle(&self, ctx: HandlerContext<'_>) -> AppResult<()> {
        ctx.sink.json(Value::Object(ctx.request.params));
        Ok(())
    }
}
