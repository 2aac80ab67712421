// src/ingest/providers/feed.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use std::time::Duration;

use crate::config::FeedUrl;
use crate::ingest::parse::parse_feed;
use crate::ingest::types::{FeedEntry, FeedSource};

/// One syndication endpoint, either fetched over HTTP or read from an
/// in-memory document (fixtures, previews).
pub struct RssFeedProvider {
    endpoint: String,
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { client: reqwest::Client },
}

impl RssFeedProvider {
    pub fn from_url(url: &FeedUrl, client: reqwest::Client) -> Self {
        Self {
            endpoint: url.as_str().to_string(),
            mode: Mode::Http { client },
        }
    }

    pub fn from_fixture_str(endpoint: &str, xml: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            mode: Mode::Fixture(xml.to_string()),
        }
    }

    /// Shared client for all feed providers of one run.
    pub fn http_client() -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(concat!("daily-brief/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .context("building feed http client")
    }

    fn parse_items_from_str(s: &str) -> Result<Vec<FeedEntry>> {
        let t0 = std::time::Instant::now();
        let items = parse_feed(s)?;
        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("news_feed_parse_ms").record(ms);
        Ok(items)
    }
}

#[async_trait]
impl FeedSource for RssFeedProvider {
    async fn fetch_items(&self) -> Result<Vec<FeedEntry>> {
        match &self.mode {
            Mode::Fixture(s) => Self::parse_items_from_str(s),
            Mode::Http { client } => {
                let body = client
                    .get(&self.endpoint)
                    .send()
                    .await
                    .context("feed http get()")?
                    .error_for_status()
                    .context("feed non-2xx")?
                    .text()
                    .await
                    .context("feed http .text()")?;
                counter!("news_feed_bytes_total").increment(body.len() as u64);
                Self::parse_items_from_str(&body)
            }
        }
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
