//! ClinicDesk - clinic management backend
//!
//! Main entry point for the HTTP server.

use std::sync::Arc;

use anyhow::Context;
use clinicdesk_api::utils::logging::init_tracing;
use clinicdesk_api::{build_router, AppContext};
use clinicdesk_domain::Config;
use clinicdesk_infra::config;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file before reading config
    let dotenv = dotenvy::dotenv();

    let (config, load_error) = match config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_tracing(&config.logging);

    if let Some(e) = load_error {
        warn!(error = %e, "no configuration found, using defaults");
    }

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) => info!(error = %e, "no .env file loaded"),
    }

    let address = config.server.bind_address();
    let ctx =
        Arc::new(AppContext::new(config).await.context("failed to build application context")?);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!(%address, backend = %ctx.config.database.backend, "ClinicDesk listening");

    axum::serve(listener, build_router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("ClinicDesk stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
    }
}
