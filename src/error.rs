// src/error.rs
//! Pipeline-level errors. Source-level faults (weather, single feeds) never
//! reach this type; they are degraded inside their own fetchers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BriefError {
    /// Weather unavailable and no news collected; synthesis must not run.
    #[error("insufficient data: weather unavailable and no news items collected")]
    InsufficientData,

    /// The generative service call failed. Fatal for the run.
    #[error("synthesis failed: {0:#}")]
    Synthesis(#[source] anyhow::Error),

    /// Startup configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl BriefError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
