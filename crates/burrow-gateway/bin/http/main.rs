mod cli;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use burrow_gateway::{App, AppState, BasicCredentials};
use burrow_storage::SqliteUrlStore;
use burrow_telemetry::TelemetryConfig;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::cli::CLI;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::try_parse()?;

    burrow_telemetry::init(
        TelemetryConfig::builder()
            .format(config.log_format.into())
            .level(config.log_level.clone())
            .build(),
    )
    .context("failed to initialize logging")?;

    info!(
        listen_addr = %config.listen_addr,
        storage_path = %config.storage_path.display(),
        log_format = %config.log_format,
        "starting burrow"
    );

    if let Some(parent) = config.storage_path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    let store = SqliteUrlStore::open(&config.storage_path)
        .await
        .context("failed to initialize storage")?;

    let mut state = AppState::new(Arc::new(store));
    match (config.http_user, config.http_password) {
        (Some(user), Some(password)) => {
            state = state.with_credentials(BasicCredentials::new(user, password));
        }
        _ => warn!("no http credentials configured, /url routes are unauthenticated"),
    }

    let router = App::router(state, Duration::from_secs(config.request_timeout_secs));

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "server started");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
