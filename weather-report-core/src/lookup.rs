use tracing::{debug, warn};

use crate::{
    Config,
    model::{LookupResult, ToolReport, WeatherQuery},
    provider::{WeatherProvider, provider_from_config},
};

/// Entry point used by the agent host: one city in, one [`LookupResult`] out.
///
/// All provider errors are caught here; nothing propagates to the caller.
#[derive(Debug)]
pub struct WeatherLookup {
    provider: Box<dyn WeatherProvider>,
}

impl WeatherLookup {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(provider_from_config(config)?))
    }

    pub async fn fetch(&self, city: &str) -> LookupResult {
        let query = WeatherQuery::new(city);

        match self.provider.current(&query).await {
            Ok(snapshot) => {
                debug!(city, temperature_c = snapshot.temperature_c, "weather lookup succeeded");
                LookupResult::Success(snapshot)
            }
            Err(err) => {
                warn!(city, kind = err.kind(), error = %err, "weather lookup failed");
                LookupResult::Failure(err.to_string())
            }
        }
    }

    /// [`Self::fetch`] rendered into the host's `{status, report}` shape.
    pub async fn report(&self, city: &str) -> ToolReport {
        self.fetch(city).await.into_report()
    }
}
