// src/weather/openweather.rs
//! OpenWeatherMap current-weather client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use super::{Coordinates, WeatherConditions, WeatherReport, WeatherSource, WeatherUnavailable};
use crate::config::WeatherConfig;

const UNKNOWN_ERROR: &str = "Nieznany błąd";
const DEFAULT_CITY: &str = "Twoja lokalizacja";

#[derive(Debug, Deserialize)]
struct Resp {
    weather: Vec<Condition>,
    main: Main,
    wind: Wind,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct Main {
    temp: f64,
    feels_like: f64,
    humidity: i64,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("daily-brief/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn from_config(cfg: &WeatherConfig) -> anyhow::Result<Self> {
        Self::new(cfg.base_url.clone(), cfg.api_key.clone())
    }

    async fn fetch_impl(&self, api_key: &str, coords: Coordinates) -> WeatherReport {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let lat = coords.lat.to_string();
        let lon = coords.lon.to_string();

        let resp = match self
            .http
            .get(&url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", api_key),
                ("units", "metric"),
                ("lang", "pl"),
            ])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "weather request failed");
                return WeatherReport::unavailable(WeatherUnavailable::Connection);
            }
        };

        let status = resp.status();
        let body = match resp.text().await {
            Ok(b) => b,
            Err(e) => {
                warn!(error = %e, %status, "weather body read failed");
                return WeatherReport::unavailable(WeatherUnavailable::Connection);
            }
        };

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            warn!(%status, %message, "weather service returned an error");
            return WeatherReport::unavailable(WeatherUnavailable::Service { message });
        }

        match parse_conditions(&body) {
            Some(c) => {
                info!(city = %c.city, temp = c.temperature, "weather fetched");
                WeatherReport::Available(c)
            }
            None => {
                warn!("weather response malformed");
                WeatherReport::unavailable(WeatherUnavailable::Connection)
            }
        }
    }
}

fn parse_conditions(body: &str) -> Option<WeatherConditions> {
    let r: Resp = serde_json::from_str(body).ok()?;
    let description = r.weather.into_iter().next()?.description;
    Some(WeatherConditions {
        city: r
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CITY.to_string()),
        description,
        temperature: r.main.temp,
        feels_like: r.main.feels_like,
        humidity: r.main.humidity,
        wind_speed: r.wind.speed,
    })
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn fetch(&self, coords: Coordinates) -> WeatherReport {
        info!(lat = coords.lat, lon = coords.lon, "fetching weather from OpenWeatherMap");
        let Some(key) = self.api_key.as_deref() else {
            warn!("OPENWEATHER_API_KEY not set; skipping weather");
            return WeatherReport::unavailable(WeatherUnavailable::MissingCredential);
        };
        self.fetch_impl(key, coords).await
    }
}
