use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mojiban_gateway::server;
use mojiban_gateway::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = mojiban_core::Config::load()?;

    // Initialize tracing (RUST_LOG wins over the configured level)
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.settings.logging.level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Config::load ran before the subscriber existed, so announce the path now
    info!(
        "Configuration loaded from {:?} (upload endpoint: {})",
        mojiban_core::Settings::config_path()?,
        config.settings.upload.endpoint
    );

    // Load fonts and sprites, build the dispatch table
    let state = Arc::new(AppState::new(&config)?);
    info!("{} image commands active", state.rules.len());

    // Run server (this blocks)
    let bind_addr = config.bind_addr();
    info!("Starting mojiban gateway on {}", bind_addr);
    server::run(state, &bind_addr).await
}
