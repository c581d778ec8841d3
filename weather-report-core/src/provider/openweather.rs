use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use std::{fmt, time::Duration};
use tracing::debug;

use crate::{
    config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS},
    error::LookupError,
    model::{WeatherQuery, WeatherSnapshot},
};

use super::WeatherProvider;

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

/// Every OpenWeather error body starts with this; weather payloads start with `{"coord"`.
const ERROR_ENVELOPE_MARKER: &str = "{\"cod\"";

const UNKNOWN_ERROR_MESSAGE: &str = "unknown error response";

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    endpoint: Url,
    http: Client,
}

impl fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct OpenWeatherProviderBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl OpenWeatherProviderBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> anyhow::Result<OpenWeatherProvider> {
        let base = self.base_url.trim_end_matches('/');
        let endpoint = Url::parse(&format!("{base}{CURRENT_WEATHER_PATH}"))
            .with_context(|| format!("Invalid OpenWeather base URL: {}", self.base_url))?;

        let http = Client::builder()
            .timeout(self.timeout)
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(OpenWeatherProvider { api_key: self.api_key, endpoint, http })
    }
}

impl OpenWeatherProvider {
    pub fn builder(api_key: impl Into<String>) -> OpenWeatherProviderBuilder {
        OpenWeatherProviderBuilder {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Current-weather URL for `city`. Query values are form-urlencoded.
    pub fn request_url(&self, city: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("appid", &self.api_key)
            .append_pair("q", city)
            .append_pair("units", "metric");
        url
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    weather: Vec<OwWeather>,
    main: OwMain,
    dt: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwErrorEnvelope {
    cod: Value,
    #[serde(default)]
    message: Option<String>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, query: &WeatherQuery) -> Result<WeatherSnapshot, LookupError> {
        let url = self.request_url(&query.city);
        debug!(city = %query.city, endpoint = %self.endpoint, "requesting current weather");

        // Errors would otherwise embed the full URL, API key included.
        let res = self.http.get(url).send().await.map_err(reqwest::Error::without_url)?;

        let status = res.status();
        let body = res.text().await.map_err(reqwest::Error::without_url)?;
        debug!(%status, bytes = body.len(), "received OpenWeather response");

        parse_response(status, &body)
    }
}

fn parse_response(status: StatusCode, body: &str) -> Result<WeatherSnapshot, LookupError> {
    if !status.is_success() || body.trim_start().starts_with(ERROR_ENVELOPE_MARKER) {
        return Err(provider_error(body));
    }

    let value: Value = serde_json::from_str(body)?;
    if value.get("cod").is_some_and(|cod| code_to_string(cod) != "200") {
        return Err(provider_error(body));
    }

    let parsed: OwCurrentResponse = serde_json::from_value(value)?;
    let weather = parsed.weather.into_iter().next().ok_or(LookupError::NoConditions)?;

    Ok(WeatherSnapshot {
        city: parsed.name,
        condition: weather.main,
        description: weather.description,
        temperature_c: parsed.main.temp,
        observed_at: parsed.dt.and_then(unix_to_utc),
    })
}

fn provider_error(body: &str) -> LookupError {
    match serde_json::from_str::<OwErrorEnvelope>(body) {
        Ok(envelope) => LookupError::Provider {
            code: code_to_string(&envelope.cod),
            message: envelope
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string()),
        },
        Err(err) => LookupError::Decode(err),
    }
}

/// OpenWeather sends `cod` as a number on success and usually as a string on failure.
fn code_to_string(cod: &Value) -> String {
    match cod {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}
