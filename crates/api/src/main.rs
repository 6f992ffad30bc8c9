//! Frontdesk - multi-tenant receptionist/CRM backend
//!
//! Main entry point for the API server.

use std::sync::Arc;

use anyhow::Context;
use frontdesk_app::{router, AppContext};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging FIRST so .env loading is visible.
    frontdesk_app::utils::logging::init();

    match dotenvy::dotenv() {
        Ok(path) => tracing::info!(path = %path.display(), "loaded .env"),
        Err(err) => tracing::debug!(error = %err, "no .env file loaded"),
    }

    let config = frontdesk_infra::config_loader::load().context("loading configuration")?;
    let bind_addr = config.server.bind_addr.clone();

    let context: Arc<AppContext> =
        AppContext::new(config).await.context("initializing application context")?;

    let app = router(context);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;

    tracing::info!(%bind_addr, "frontdesk listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving")?;

    tracing::info!("frontdesk stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install shutdown handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
