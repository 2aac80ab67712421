// src/weather/mod.rs
//! Weather report model and the source abstraction used by the pipeline.

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Geographic point the report is requested for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherConditions {
    pub city: String,
    pub description: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: i64,
    pub wind_speed: f64,
}

/// Why no weather could be obtained. Each reason renders to a fixed sentinel text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherUnavailable {
    MissingCredential,
    Service { message: String },
    Connection,
}

impl WeatherUnavailable {
    pub fn sentinel_text(&self) -> String {
        match self {
            Self::MissingCredential => "⚠️ Brak klucza API OpenWeather w konfiguracji".to_string(),
            Self::Service { message } => format!("Błąd API pogody: {message}"),
            Self::Connection => "Brak danych pogodowych (błąd połączenia).".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherReport {
    Available(WeatherConditions),
    Unavailable { reason: WeatherUnavailable },
}

impl WeatherReport {
    pub fn unavailable(reason: WeatherUnavailable) -> Self {
        Self::Unavailable { reason }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Normalized text block, or `None` for the unavailable variant.
    pub fn available_text(&self) -> Option<String> {
        match self {
            Self::Available(c) => Some(format_conditions(c)),
            Self::Unavailable { .. } => None,
        }
    }

    /// Text handed to the prompt: the normalized block or the sentinel.
    pub fn to_prompt_text(&self) -> String {
        match self {
            Self::Available(c) => format_conditions(c),
            Self::Unavailable { reason } => reason.sentinel_text(),
        }
    }
}

fn format_conditions(c: &WeatherConditions) -> String {
    format!(
        "MIASTO: {}\nOPIS: {}\nTEMP: {:.1}°C (Odczuwalna: {:.1}°C)\nWILGOTNOŚĆ: {}%\nWIATR: {} m/s\n",
        c.city,
        capitalize_first(&c.description),
        c.temperature,
        c.feels_like,
        c.humidity,
        c.wind_speed
    )
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Anything that can produce a weather report. Implementations must never fail:
/// faults are reported through `WeatherReport::Unavailable`.
#[async_trait::async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch(&self, coords: Coordinates) -> WeatherReport;
}
