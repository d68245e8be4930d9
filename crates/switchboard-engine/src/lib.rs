//! # switchboard-engine
//!
//! The Data Access Delegate boundary. The dispatcher talks to the backing
//! data engine exclusively through the [`QueryEngine`]/[`QuerySession`]
//! traits: one session per request, released on every exit path. The
//! engine compiles and executes the declarative query text; this crate
//! only extracts the operation keyword that selects which session call to
//! make.
//!
//! [`memory::MemoryEngine`] is a reference implementation backed by
//! in-process tables, used by the test suite and the demo configuration.

pub mod memory;
pub mod op;
pub mod traits;

pub use op::Operation;
pub use traits::{QueryEngine, QuerySession};
