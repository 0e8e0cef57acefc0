//! Search Gateway - Web Server Entry Point
//!
//! This binary starts the HTTP server that translates REST API requests
//! into search engine queries and streams results back.

use anyhow::Context;
use clap::Parser;
use quaero::{
    api::create_router,
    config::{CliArgs, Config},
    logging,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first to get logging settings
    let args = CliArgs::parse();
    let mut config = Config::load().context("Failed to load configuration")?;
    config.apply_cli(&args);

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let _logging_guard =
        logging::init_logging(&config.logging).context("Failed to initialize logging")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting search gateway"
    );

    let addr = config
        .socket_addr()
        .context("Failed to determine socket address")?;
    let url_prefix = config.server.url_prefix.clone();
    let engine_url = config.elasticsearch.url.clone();

    let state = AppState::new(config).context("Failed to initialize application state")?;

    // The gateway starts regardless of engine availability; requests fail
    // upstream until it comes back.
    if state.es.ping().await {
        tracing::info!(engine_url = %engine_url, "Search engine reachable");
    } else {
        tracing::warn!(
            engine_url = %engine_url,
            "Search engine is not reachable; requests will fail until it is"
        );
    }

    let app = create_router(state);

    tracing::info!("Search gateway listening on http://{}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("API endpoint: http://{}{}", addr, url_prefix);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener on {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated unexpectedly")?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
/// Docker sends SIGTERM, while Ctrl+C sends SIGINT
#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm =
        signal(SignalKind::terminate()).expect("Failed to install SIGTERM signal handler");
    let sigint = tokio::signal::ctrl_c();

    tokio::select! {
        _ = sigint => {
            tracing::info!("SIGINT received, starting graceful shutdown...");
        }
        _ = sigterm.recv() => {
            tracing::info!("SIGTERM received, starting graceful shutdown...");
        }
    }
}

/// Wait for shutdown signal (SIGINT only on non-Unix platforms)
#[cfg(not(unix))]
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
