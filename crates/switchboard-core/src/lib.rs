//! # switchboard-core
//!
//! Core crate for Switchboard. Contains configuration schemas, the domain
//! types shared by every layer (API definitions, plugin bindings, request
//! parameters, the response envelope), and the unified error system.
//!
//! This crate has **no** internal dependencies on other Switchboard crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
