// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod ingest;
pub mod notify;
pub mod pipeline;
pub mod render;
pub mod synth;
pub mod weather;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{aggregate, is_insufficient, CompositePayload};
pub use crate::error::BriefError;
pub use crate::pipeline::{Pipeline, RunOutcome};
pub use crate::synth::{DigestDocument, Synthesizer};
pub use crate::weather::{WeatherReport, WeatherUnavailable};

use tracing::info;

/// Load configuration from the environment and feed list, validate it, and
/// perform one run. Callers are expected to have loaded `.env` and tracing.
pub async fn run_from_env() -> Result<RunOutcome, BriefError> {
    let cfg = config::BriefConfig::from_env()?;
    let raw_feeds = config::load_feeds_default().map_err(|e| BriefError::config(format!("{e:#}")))?;
    let feeds = config::validate_feed_urls(&raw_feeds)?;
    info!(
        feeds = feeds.len(),
        model = %cfg.llm.model,
        lat = cfg.weather.coords.lat,
        lon = cfg.weather.coords.lon,
        "configuration loaded"
    );

    let pipeline = Pipeline::from_config(&cfg, &feeds)?;
    pipeline.run_once().await
}
