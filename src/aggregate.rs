// src/aggregate.rs
//! Fan-in of the two fetchers into the single payload handed to synthesis.

use crate::error::BriefError;
use crate::weather::WeatherReport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositePayload {
    pub weather_text: String,
    pub news_text: String,
}

/// True when neither source produced anything usable. Blank counts as missing.
pub fn is_insufficient(weather: Option<&str>, news: Option<&str>) -> bool {
    let missing = |s: Option<&str>| s.map_or(true, |v| v.trim().is_empty());
    missing(weather) && missing(news)
}

/// Build the payload, or refuse when there is nothing to summarize.
/// Texts are passed through unmodified.
pub fn aggregate(weather: &WeatherReport, news_text: String) -> Result<CompositePayload, BriefError> {
    let available = weather.available_text();
    if is_insufficient(available.as_deref(), Some(news_text.as_str())) {
        return Err(BriefError::InsufficientData);
    }
    Ok(CompositePayload {
        weather_text: available.unwrap_or_else(|| weather.to_prompt_text()),
        news_text,
    })
}
