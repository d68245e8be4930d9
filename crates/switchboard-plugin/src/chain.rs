//! Interceptor chain executor — runs before/after hook sequences in order
//! with short-circuit semantics.
//!
//! For both phases:
//! - Bindings run strictly in resolved order.
//! - A binding naming an unregistered plugin aborts the request with a
//!   plugin-not-found error; nothing later in the chain (nor the action)
//!   runs.
//! - A hook returning [`HookOutcome::Halt`] stops the chain and the
//!   request immediately.
//!
//! Per-binding options are decoded from the binding's serialized text once
//! per invocation.

use serde_json::Value;
use tracing::debug;

use switchboard_core::types::{PluginBinding, decode_options};
use switchboard_core::{AppError, AppResult};

use crate::registry::PluginRegistry;
use crate::traits::{HookContext, HookOutcome};

/// Result of running one phase of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainOutcome {
    /// Every hook continued.
    Completed,
    /// A hook short-circuited the request.
    Halted,
}

/// Runs hook chains against a plugin registry.
pub struct ChainExecutor<'a> {
    plugins: &'a PluginRegistry,
}

impl<'a> ChainExecutor<'a> {
    /// Creates an executor over the given registry.
    pub fn new(plugins: &'a PluginRegistry) -> Self {
        Self { plugins }
    }

    /// Run the before-phase over the resolved bindings.
    pub async fn run_before(
        &self,
        bindings: &[PluginBinding],
        ctx: &mut HookContext,
    ) -> AppResult<ChainOutcome> {
        for binding in bindings {
            let plugin = self
                .plugins
                .get(&binding.name)
                .await
                .ok_or_else(|| AppError::plugin_not_found(&binding.name))?;
            let options = decode_options(binding.options.as_deref())?;

            match plugin.before(ctx, &options).await? {
                HookOutcome::Continue => {
                    debug!(plugin = %binding.name, path = %ctx.path, "before hook continued");
                }
                HookOutcome::Halt => {
                    debug!(plugin = %binding.name, path = %ctx.path, "before hook halted");
                    return Ok(ChainOutcome::Halted);
                }
            }
        }
        Ok(ChainOutcome::Completed)
    }

    /// Run the after-phase over the resolved bindings, with the action's
    /// result when one exists.
    ///
    /// The registry is consulted again: a plugin removed between the two
    /// phases aborts here, before anything is emitted.
    pub async fn run_after(
        &self,
        bindings: &[PluginBinding],
        ctx: &mut HookContext,
        result: Option<&Value>,
    ) -> AppResult<ChainOutcome> {
        for binding in bindings {
            let plugin = self
                .plugins
                .get(&binding.name)
                .await
                .ok_or_else(|| AppError::plugin_not_found(&binding.name))?;
            let options = decode_options(binding.options.as_deref())?;

            match plugin.after(ctx, result, &options).await? {
                HookOutcome::Continue => {
                    debug!(plugin = %binding.name, path = %ctx.path, "after hook continued");
                }
                HookOutcome::Halt => {
                    debug!(plugin = %binding.name, path = %ctx.path, "after hook halted");
                    return Ok(ChainOutcome::Halted);
                }
            }
        }
        Ok(ChainOutcome::Completed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::Map;

    use switchboard_core::error::ErrorKind;
    use switchboard_core::types::{MatchType, RequestParams};

    use super::*;
    use crate::traits::Plugin;

    struct CountingPlugin {
        name: String,
        halt_before: bool,
        before_calls: AtomicUsize,
        after_calls: AtomicUsize,
    }

    impl CountingPlugin {
        fn new(name: &str, halt_before: bool) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                halt_before,
                before_calls: AtomicUsize::new(0),
                after_calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Plugin for CountingPlugin {
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
            self.before_calls.fetch_add(1, Ordering::SeqCst);
            if self.halt_before {
                Ok(HookOutcome::Halt)
            } else {
                Ok(HookOutcome::Continue)
            }
        }

        async fn after(
            &self,
            _ctx: &mut HookContext,
            _result: Option<&Value>,
            _options: &Map<String, Value>,
        ) -> AppResult<HookOutcome> {
            self.after_calls.fetch_add(1, Ordering::SeqCst);
            Ok(HookOutcome::Continue)
        }
    }

    fn binding(name: &str) -> PluginBinding {
        PluginBinding {
            name: name.to_string(),
            match_type: MatchType::Url,
            match_value: "/*".to_string(),
            options: None,
            weight: 0,
            comment: None,
        }
    }

    fn ctx() -> HookContext {
        HookContext::new("GET", "/users", RequestParams::default(), None)
    }

    #[tokio::test]
    async fn halt_stops_remaining_hooks() {
        let registry = PluginRegistry::new();
        let first = CountingPlugin::new("first", true);
        let second = CountingPlugin::new("second", false);
        registry.register(first.clone()).await;
        registry.register(second.clone()).await;

        let executor = ChainExecutor::new(&registry);
        let outcome = executor
            .run_before(&[binding("first"), binding("second")], &mut ctx())
            .await
            .unwrap();

        assert_eq!(outcome, ChainOutcome::Halted);
        assert_eq!(first.before_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.before_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_plugin_aborts_the_chain() {
        let registry = PluginRegistry::new();
        let known = CountingPlugin::new("known", false);
        registry.register(known.clone()).await;

        let executor = ChainExecutor::new(&registry);
        let err = executor
            .run_before(&[binding("ghost"), binding("known")], &mut ctx())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::PluginNotFound);
        assert_eq!(err.message, "plugin ghost not exists");
        assert_eq!(known.before_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn plugin_removed_between_phases_aborts_after_chain() {
        let registry = PluginRegistry::new();
        let plugin = CountingPlugin::new("log", false);
        registry.register(plugin.clone()).await;

        let executor = ChainExecutor::new(&registry);
        let bindings = vec![binding("log")];
        let mut context = ctx();

        executor.run_before(&bindings, &mut context).await.unwrap();
        registry.unregister("log").await;

        let err = executor
            .run_after(&bindings, &mut context, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::PluginNotFound);
    }

    #[tokio::test]
    async fn malformed_binding_options_fail_the_request() {
        let registry = PluginRegistry::new();
        registry.register(CountingPlugin::new("log", false)).await;

        let mut bad = binding("log");
        bad.options = Some("{broken".to_string());

        let executor = ChainExecutor::new(&registry);
        let err = executor.run_before(&[bad], &mut ctx()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Serialization);
    }
}
