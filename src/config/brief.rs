// src/config/brief.rs
//! Runtime configuration read from the process environment (after `.env`
//! has been loaded by the binary).

use std::env;

use crate::error::BriefError;
use crate::weather::Coordinates;

pub const DEFAULT_LAT: f64 = 53.12;
pub const DEFAULT_LON: f64 = 18.00;
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";
/// The newsletter prompt is tuned for this model; it is not configurable.
pub const LLM_MODEL: &str = "llama-3.3-70b-versatile";
pub const LLM_TEMPERATURE: f32 = 0.6;

#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub base_url: String,
    /// Absent key is not an error; the weather fetcher degrades instead.
    pub api_key: Option<String>,
    pub coords: Coordinates,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
}

#[derive(Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub sender: String,
    pub password: String,
    pub receiver: String,
}

// Keep the password out of logs.
impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("sender", &self.sender)
            .field("receiver", &self.receiver)
            .field("password_len", &self.password.len())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct BriefConfig {
    pub weather: WeatherConfig,
    pub llm: LlmConfig,
    pub email: EmailConfig,
}

impl BriefConfig {
    pub fn from_env() -> Result<Self, BriefError> {
        let coords = Coordinates {
            lat: parse_f64_env("BRIEF_LAT")?.unwrap_or(DEFAULT_LAT),
            lon: parse_f64_env("BRIEF_LON")?.unwrap_or(DEFAULT_LON),
        };

        let weather = WeatherConfig {
            base_url: optional("WEATHER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_WEATHER_BASE_URL.to_string()),
            api_key: optional("OPENWEATHER_API_KEY"),
            coords,
        };

        let llm = LlmConfig {
            base_url: optional("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
            api_key: required("GROQ_API_KEY")?,
            model: LLM_MODEL.to_string(),
            temperature: LLM_TEMPERATURE,
        };

        let smtp_port = match optional("SMTP_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| BriefError::config(format!("SMTP_PORT is not a port number: {raw}")))?,
            None => DEFAULT_SMTP_PORT,
        };

        let email = EmailConfig {
            smtp_host: optional("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            smtp_port,
            sender: required("EMAIL_SENDER")?,
            password: required("EMAIL_PASSWORD")?,
            receiver: required("EMAIL_RECEIVER")?,
        };

        Ok(Self {
            weather,
            llm,
            email,
        })
    }
}

/// Unset and blank are treated the same.
fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(key: &str) -> Result<String, BriefError> {
    optional(key).ok_or_else(|| BriefError::config(format!("missing {key} env var")))
}

fn parse_f64_env(key: &str) -> Result<Option<f64>, BriefError> {
    match optional(key) {
        Some(raw) => raw
            .parse::<f64>()
            .map(Some)
            .map_err(|_| BriefError::config(format!("{key} is not a number: {raw}"))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: &[&str] = &[
        "BRIEF_LAT",
        "BRIEF_LON",
        "WEATHER_BASE_URL",
        "OPENWEATHER_API_KEY",
        "LLM_BASE_URL",
        "GROQ_API_KEY",
        "LLM_MODEL",
        "SMTP_HOST",
        "SMTP_PORT",
        "EMAIL_SENDER",
        "EMAIL_PASSWORD",
        "EMAIL_RECEIVER",
    ];

    fn clear() {
        for k in KEYS {
            env::remove_var(k);
        }
    }

    fn set_required() {
        env::set_var("GROQ_API_KEY", "gsk-test");
        env::set_var("EMAIL_SENDER", "bot@example.com");
        env::set_var("EMAIL_PASSWORD", "app-password");
        env::set_var("EMAIL_RECEIVER", "me@example.com");
    }

    #[serial_test::serial]
    #[test]
    fn defaults_apply_when_optional_vars_are_unset() {
        clear();
        set_required();
        env::set_var("OPENWEATHER_API_KEY", "   ");

        let cfg = BriefConfig::from_env().unwrap();
        assert_eq!(cfg.weather.coords.lat, DEFAULT_LAT);
        assert_eq!(cfg.weather.coords.lon, DEFAULT_LON);
        assert!(cfg.weather.api_key.is_none(), "blank key counts as absent");
        assert_eq!(cfg.llm.model, LLM_MODEL);
        assert_eq!(cfg.llm.temperature, LLM_TEMPERATURE);
        assert_eq!(cfg.email.smtp_host, DEFAULT_SMTP_HOST);
        assert_eq!(cfg.email.smtp_port, DEFAULT_SMTP_PORT);
        clear();
    }

    #[serial_test::serial]
    #[test]
    fn model_identity_ignores_environment() {
        clear();
        set_required();
        env::set_var("LLM_MODEL", "some-other-model");

        let cfg = BriefConfig::from_env().unwrap();
        assert_eq!(cfg.llm.model, "llama-3.3-70b-versatile");
        clear();
    }

    #[serial_test::serial]
    #[test]
    fn missing_llm_key_is_a_config_error() {
        clear();
        set_required();
        env::remove_var("GROQ_API_KEY");

        let err = BriefConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("GROQ_API_KEY"), "{err}");
        clear();
    }

    #[serial_test::serial]
    #[test]
    fn bad_coordinate_is_rejected() {
        clear();
        set_required();
        env::set_var("BRIEF_LAT", "north");

        assert!(matches!(
            BriefConfig::from_env(),
            Err(BriefError::Config(_))
        ));
        clear();
    }

    #[test]
    fn debug_output_hides_password() {
        let cfg = EmailConfig {
            smtp_host: "smtp.example.com".into(),
            smtp_port: 587,
            sender: "a@example.com".into(),
            password: "hunter2".into(),
            receiver: "b@example.com".into(),
        };
        let s = format!("{cfg:?}");
        assert!(!s.contains("hunter2"));
        assert!(s.contains("password_len"));
    }
}
