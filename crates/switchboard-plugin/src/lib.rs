//! # switchboard-plugin
//!
//! The capability system: the [`Plugin`] and [`Handler`] traits, their
//! registries, the plugin-binding resolver, and the two-phase interceptor
//! chain executor. Capabilities are registered explicitly at startup;
//! bindings in the plugin table attach them to requests at dispatch time.

pub mod builtin;
pub mod chain;
pub mod registry;
pub mod resolver;
pub mod sink;
pub mod traits;

pub use chain::{ChainExecutor, ChainOutcome};
pub use registry::{CapabilityInfo, HandlerRegistry, PluginRegistry};
pub use resolver::resolve;
pub use sink::ResponseSink;
pub use traits::{Handler, HandlerContext, HandlerRequest, HookContext, HookOutcome, Plugin};
