//! Domain types shared across Switchboard crates.

pub mod api;
pub mod binding;
pub mod body;
pub mod envelope;
pub mod options;
pub mod params;

pub use api::{ApiAction, ApiDefinition};
pub use binding::{MatchType, PluginBinding};
pub use body::StagedBody;
pub use envelope::Envelope;
pub use options::{OptionKind, OptionSchema, OptionSpec, decode_options};
pub use params::{Page, RequestParams};
