//! Pricing service entry point.
//!
//! Reads configuration from the environment (a `.env` file is honoured)
//! and serves the pricing API.

use anyhow::Context;
use tracing::info;

use paris_transfers_pricing::config::Config;
use paris_transfers_pricing::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine; real deployments set variables directly
    let dotenv = dotenvy::dotenv();

    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let address = config.address();
    let state = AppState::new(config);
    info!(
        "Tariff loaded: {} routes, currency {}, night surcharge {}",
        state.tariff.len(),
        state.quotes.currency,
        state.quotes.night_surcharge
    );

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    info!("Pricing service listening on {}", address);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Pricing service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
