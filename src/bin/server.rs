//! Org Capture Server
//!
//! HTTP API that appends captured notes to an org file.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use org_capture::{config::Config, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Capture file: {:?}", config.capture_path());

    let app = server::router(server::AppState::new(&config));

    let listener = bind(&config).await?;
    tracing::info!("Starting org-capture API server on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Bind the first candidate address that succeeds
async fn bind(config: &Config) -> anyhow::Result<tokio::net::TcpListener> {
    let mut last_err = None;
    for addr in config.bind_addrs() {
        match tokio::net::TcpListener::bind(&addr).await {
            Ok(listener) => return Ok(listener),
            Err(e) => {
                tracing::warn!("Could not bind {}: {}", addr, e);
                last_err = Some(e);
            }
        }
    }
    Err(last_err.map_or_else(
        || anyhow::anyhow!("No address to bind"),
        anyhow::Error::from,
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
