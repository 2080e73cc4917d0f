//! EcoFoodSystems dashboard server
//!
//! Run with: cargo run --bin ecofood
//!
//! # Configuration
//!
//! Settings come from `config.toml` (see `ecofood-cli config`), overridden by:
//! - `PORT`: Port to listen on; also switches to production mode
//! - `ECOFOOD_HOST`: Host to bind to (default: 0.0.0.0)
//! - `ECOFOOD_DATA_DIR`: Dataset directory (default: assets/data)
//! - `ECOFOOD_ASSETS_DIR`: Directory served under /assets (default: assets)
//! - `ECOFOOD_LOG_LEVEL`, `ECOFOOD_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Log filter, takes precedence over the configured level

use anyhow::Context;
use ecofood::api::{serve, AppState};
use ecofood::config::Config;
use ecofood::data::Datasets;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default()?;
    ecofood::logging::init(&config.logging);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        debug = config.server.debug,
        "Starting EcoFoodSystems dashboard"
    );

    let data_dir = config.data.data_dir.clone();
    let datasets = tokio::task::spawn_blocking(move || Datasets::load(&data_dir))
        .await
        .context("dataset loader panicked")?
        .with_context(|| format!("loading datasets from {}", config.data.data_dir.display()))?;

    serve(AppState::new(datasets, config)).await?;

    tracing::info!("Dashboard stopped");
    Ok(())
}
