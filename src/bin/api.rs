//! Menopulse API Server
//!
//! Run with: cargo run --bin menopulse-api
//!
//! # Configuration
//!
//! Loaded from `config.toml` in the usual locations (see `menopulse config`),
//! then overridden by environment variables:
//! - `MENOPULSE_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `MENOPULSE_API_PORT`: Port to listen on (default: 8090)
//! - `MENOPULSE_TIMING`: Symptom timing classifier, random or recorded (default: random)
//! - `MENOPULSE_TIMING_SEED`: Seed for the random classifier (optional)
//! - `MENOPULSE_LOG_LEVEL` / `MENOPULSE_LOG_FORMAT`: Logging (default: info / pretty)
//! - `RUST_LOG`: Full filter override

use menopulse::analytics::AnalyticsEngine;
use menopulse::api::{serve, AppState};
use menopulse::config::Config;
use menopulse::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();

    // Initialize tracing
    init_logging(&config.logging, "tower_http=debug");

    tracing::info!("Starting Menopulse API server v{}", env!("CARGO_PKG_VERSION"));

    let analytics = AnalyticsEngine::new(config.analysis.timing, config.analysis.timing_seed);
    tracing::info!(
        classifier = analytics.timing_name(),
        seeded = config.analysis.timing_seed.is_some(),
        "Symptom timing classifier ready"
    );

    let state = AppState::new(analytics, config.api.clone());

    // Run server
    tracing::info!("Starting server on {}:{}", config.api.host, config.api.port);
    serve(state, &config.api).await?;

    tracing::info!("Menopulse API server stopped");

    Ok(())
}
