//! # switchboard-api
//!
//! The HTTP layer. The dispatcher runs as a middleware over the whole
//! router: it matches the request path against the API table, resolves the
//! applicable plugin bindings, runs the before-chain, executes the
//! declarative or handler action, runs the after-chain, and emits the
//! response envelope. Requests that match no API fall through to the inner
//! router (the administration surface, then the 404 fallback).

pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
