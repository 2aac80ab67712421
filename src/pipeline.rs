// src/pipeline.rs
//! One sequential run: fetch -> gate -> synthesize -> render -> publish.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{error, info, warn};

use crate::aggregate::{aggregate, CompositePayload};
use crate::config::{BriefConfig, FeedUrl};
use crate::error::BriefError;
use crate::ingest::providers::RssFeedProvider;
use crate::ingest::{collect_news, count_records, types::FeedSource};
use crate::notify::{EmailSender, Publisher};
use crate::render::{render_email, subject_line};
use crate::synth::{validate::check_digest, ChatCompletionsClient, Synthesizer};
use crate::weather::{Coordinates, OpenWeatherClient, WeatherSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Digest produced and handed to the delivery channel.
    Delivered,
    /// Digest produced but delivery failed (logged).
    DeliveryFailed(String),
    /// Gate closed before synthesis; nothing was generated.
    InsufficientData,
}

pub struct Pipeline {
    pub weather: Box<dyn WeatherSource>,
    pub coords: Coordinates,
    pub feeds: Vec<Box<dyn FeedSource>>,
    pub synthesizer: Synthesizer,
    pub publisher: Box<dyn Publisher>,
}

impl Pipeline {
    /// Wire the production adapters. Fails only on unusable configuration.
    pub fn from_config(cfg: &BriefConfig, feeds: &[FeedUrl]) -> Result<Self, BriefError> {
        let cfg_err = |e: anyhow::Error| BriefError::config(format!("{e:#}"));

        let weather = OpenWeatherClient::from_config(&cfg.weather).map_err(cfg_err)?;
        let feed_client = RssFeedProvider::http_client().map_err(cfg_err)?;
        let feeds: Vec<Box<dyn FeedSource>> = feeds
            .iter()
            .map(|u| Box::new(RssFeedProvider::from_url(u, feed_client.clone())) as Box<dyn FeedSource>)
            .collect();
        let generator = ChatCompletionsClient::new(&cfg.llm).map_err(cfg_err)?;
        let publisher = EmailSender::from_config(&cfg.email).map_err(cfg_err)?;

        Ok(Self {
            weather: Box::new(weather),
            coords: cfg.weather.coords,
            feeds,
            synthesizer: Synthesizer::new(Arc::new(generator)),
            publisher: Box::new(publisher),
        })
    }

    /// Run both fetchers and the gate. Exposed separately so the payload can be
    /// inspected without touching the generative service.
    pub async fn gather(&self) -> Result<CompositePayload, BriefError> {
        let report = self.weather.fetch(self.coords).await;
        let news = collect_news(&self.feeds).await;
        info!(
            weather_available = report.is_available(),
            news_items = count_records(&news),
            "sources gathered"
        );
        aggregate(&report, news)
    }

    pub async fn run_once(&self) -> Result<RunOutcome, BriefError> {
        self.run_on(Local::now().date_naive()).await
    }

    pub async fn run_on(&self, date: NaiveDate) -> Result<RunOutcome, BriefError> {
        info!("brief run starting");

        let payload = match self.gather().await {
            Ok(p) => p,
            Err(BriefError::InsufficientData) => {
                warn!("no data to send; stopping before synthesis");
                return Ok(RunOutcome::InsufficientData);
            }
            Err(e) => return Err(e),
        };

        let digest = self.synthesizer.synthesize(&payload).await?;

        let issues = check_digest(digest.as_markdown());
        if !issues.is_empty() {
            warn!(?issues, "digest deviates from the requested structure");
        }

        let subject = subject_line(date);
        let html = render_email(&digest, date);

        info!(channel = self.publisher.name(), "publishing digest");
        match self.publisher.publish(&subject, &html).await {
            Ok(()) => {
                info!(channel = self.publisher.name(), "digest delivered");
                Ok(RunOutcome::Delivered)
            }
            Err(e) => {
                error!(error = ?e, channel = self.publisher.name(), "digest delivery failed");
                Ok(RunOutcome::DeliveryFailed(format!("{e:#}")))
            }
        }
    }
}
