//! Unified application error types for Switchboard.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Dispatch failures carry the exact
//! message that goes out in the failure envelope.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A plugin binding references a plugin that is not registered.
    PluginNotFound,
    /// An API references a handler that is not registered.
    HandlerNotFound,
    /// Declarative query text has no extractable operation keyword.
    InvalidQuery,
    /// The declarative path was taken with no data engine configured.
    EngineUnavailable,
    /// An API definition has neither query text nor a handler name.
    MisconfiguredApi,
    /// A data engine call failed.
    Engine,
    /// A table store read or write failed.
    Store,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PluginNotFound => write!(f, "PLUGIN_NOT_FOUND"),
            Self::HandlerNotFound => write!(f, "HANDLER_NOT_FOUND"),
            Self::InvalidQuery => write!(f, "INVALID_QUERY"),
            Self::EngineUnavailable => write!(f, "ENGINE_UNAVAILABLE"),
            Self::MisconfiguredApi => write!(f, "MISCONFIGURED_API"),
            Self::Engine => write!(f, "ENGINE"),
            Self::Store => write!(f, "STORE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Switchboard.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. The `message` of a dispatch-taxonomy
/// error is surfaced verbatim as the `msg` of the failure envelope.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// A plugin binding names a plugin missing from the registry.
    pub fn plugin_not_found(name: &str) -> Self {
        Self::new(ErrorKind::PluginNotFound, format!("plugin {name} not exists"))
    }

    /// An API names a handler missing from the registry.
    pub fn handler_not_found(name: &str) -> Self {
        Self::new(ErrorKind::HandlerNotFound, format!("handler {name} not exists"))
    }

    /// Query text with no extractable operation keyword.
    pub fn invalid_query(text: &str) -> Self {
        Self::new(ErrorKind::InvalidQuery, format!("query {text} error"))
    }

    /// The declarative path was attempted without a configured engine.
    pub fn engine_unavailable() -> Self {
        Self::new(ErrorKind::EngineUnavailable, "db not connect")
    }

    /// An API definition carries neither query text nor a handler name.
    pub fn misconfigured_api(url: &str) -> Self {
        Self::new(
            ErrorKind::MisconfiguredApi,
            format!("api {url} has no query or handler"),
        )
    }

    /// Create an engine error.
    pub fn engine(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Engine, message)
    }

    /// Create a store error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Store, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Store, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
