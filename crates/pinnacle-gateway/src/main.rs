//! Gateway entry point.
//!
//! Loads `.env` if present, initializes logging, reads configuration from
//! the environment, builds the provider and serves the API until `Ctrl-C`.

use std::sync::Arc;

use anyhow::Context as _;
use pinnacle_gateway::{create_provider, start_server, AppState, GatewayConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is normal outside local development.
    let dotenv = dotenvy::dotenv().ok();

    init_tracing();
    info!("pinnacle-gateway starting");
    if let Some(path) = dotenv {
        info!(path = %path.display(), "loaded environment file");
    }

    let config = GatewayConfig::from_env().context("loading configuration")?;
    info!(
        host = config.host,
        port = config.port,
        cors_origins = ?config.cors_origins,
        "configuration loaded"
    );

    let provider = create_provider(&config.provider);
    info!(
        provider = provider.name(),
        model = provider.model(),
        "provider configured"
    );

    let state = Arc::new(AppState::new(provider));
    start_server(&config, state).await.context("running server")?;

    Ok(())
}

/// Structured logging, filtered by `RUST_LOG` (default `info`).
///
/// `LOG_FORMAT=json` switches to one JSON object per line.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
