//! # switchboard-store
//!
//! The persisted tables: ordered API definitions (with their group list)
//! and ordered plugin bindings. Both are held in memory behind
//! `tokio::sync::RwLock` and written through to JSON files on every
//! mutation.
//!
//! The dispatcher reads these tables live on every request; reads are
//! per-access, not snapshotted, so a request racing an administrative
//! mutation may observe part-old/part-new state. Configuration edits are
//! infrequent and administrative, so the tables are not linearized against
//! dispatch.

pub mod api_table;
pub mod plugin_table;

pub use api_table::ApiTable;
pub use plugin_table::PluginTable;
