//! Switchboard Server — data-driven API runtime
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use switchboard_core::config::AppConfig;
use switchboard_core::error::AppError;
use switchboard_engine::QueryEngine;
use switchboard_engine::memory::MemoryEngine;
use switchboard_plugin::builtin::{EchoHandler, LogPlugin};
use switchboard_plugin::{HandlerRegistry, PluginRegistry};
use switchboard_store::{ApiTable, PluginTable};

#[tokio::main]
async fn main() {
    let env = std::env::var("SWITCHBOARD_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Switchboard v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Load the persisted tables ────────────────────────
    let apis = Arc::new(ApiTable::load(&config.tables.api_path).await?);
    let bindings = Arc::new(PluginTable::load(&config.tables.plugin_path).await?);

    // ── Step 2: Register capabilities ────────────────────────────
    let plugins = Arc::new(PluginRegistry::new());
    plugins.register(Arc::new(LogPlugin)).await;

    let handlers = Arc::new(HandlerRegistry::new());
    handlers.register(Arc::new(EchoHandler)).await;

    // ── Step 3: Select the data engine ───────────────────────────
    let engine: Option<Arc<dyn QueryEngine>> = match config.engine.provider.as_str() {
        "memory" => {
            tracing::info!("Using in-memory data engine");
            Some(Arc::new(MemoryEngine::new()))
        }
        "none" => {
            tracing::warn!("No data engine configured; declarative apis will fail");
            None
        }
        other => {
            return Err(AppError::configuration(format!(
                "unknown engine provider '{other}'"
            )));
        }
    };

    if config.server.admin {
        tracing::warn!("Administration surface enabled at /_edit");
    }

    // ── Step 4: Build and start the HTTP server ──────────────────
    let state = switchboard_api::AppState {
        config: Arc::new(config.clone()),
        apis,
        bindings,
        plugins,
        handlers,
        engine,
    };

    let app = switchboard_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Switchboard server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Switchboard server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
