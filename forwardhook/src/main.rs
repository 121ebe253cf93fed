//! Forwardhook - webhook fan-out relay.
//!
//! This binary:
//! - Loads the destination list and retry settings from the environment
//! - Listens for hooks on `POST /`
//! - Relays each hook to every destination in the background
//! - Returns 200 OK without waiting for delivery

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use forwardhook::{router, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("forwardhook_starting");

    // Load configuration
    let config = Config::from_env();
    info!(
        port = config.port,
        sites_file = %config.sites_file,
        sites = ?config.sites,
        max_attempts = config.retry.attempt_limit(),
        backoff_ms = config.retry.backoff.as_millis() as u64,
        request_timeout_ms = ?config.request_timeout.map(|t| t.as_millis() as u64),
        preserve_transport_headers = config.preserve_transport_headers,
        "config_loaded"
    );

    let addr = config.listen_addr();
    let state = AppState::new(config).context("Failed to create HTTP client")?;
    let app = router(state);

    // Bind to address
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "forwardhook_listening");

    // Run server with graceful shutdown. Forward tasks still in flight are
    // dropped with the runtime.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("forwardhook_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "ctrl_c_handler_failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "sigterm_handler_failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("forwardhook_shutting_down");
}
