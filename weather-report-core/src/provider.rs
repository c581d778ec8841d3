use crate::{
    Config, WeatherQuery, WeatherSnapshot, error::LookupError,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch the current weather. Exactly one outbound request per call.
    async fn current(&self, query: &WeatherQuery) -> Result<WeatherSnapshot, LookupError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.openweather_api_key()?;
    let provider = OpenWeatherProvider::builder(api_key)
        .base_url(&config.openweather.base_url)
        .timeout(config.openweather.timeout())
        .build()?;

    Ok(Box::new(provider))
}
