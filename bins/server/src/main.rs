//! Splitter API Server
//!
//! Main entry point for the split service.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use splitter_api::{AppState, create_router};
use splitter_core::SplitService;
use splitter_shared::config::{LogConfig, is_production, run_mode};
use splitter_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file outside production
    if !is_production() {
        dotenvy::dotenv().ok();
    }

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(&config.log);
    info!(run_mode = %run_mode(), "Configuration loaded");

    // One store for the whole process, shared through the router state
    let state = AppState::new(SplitService::in_memory());
    let app = create_router(state);

    // Start server
    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log.filter.as_str().into());

    tracing_subscriber::registry()
        .with(filter)
        .with(log.json.then(|| fmt::layer().json()))
        .with((!log.json).then(fmt::layer))
        .init();
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed.
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
