// src/config/mod.rs
pub mod brief;
pub mod feeds;

pub use brief::{BriefConfig, EmailConfig, LlmConfig, WeatherConfig};
pub use feeds::{load_feeds_default, load_feeds_from, validate_feed_urls, FeedUrl, DEFAULT_FEEDS};
