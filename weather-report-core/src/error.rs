use thiserror::Error;

/// Everything that can go wrong during a single weather lookup.
///
/// None of these cross the [`crate::WeatherLookup`] boundary as errors; they are
/// rendered into [`crate::LookupResult::Failure`].
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request to weather provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse weather provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("weather provider returned error {code}: {message}")]
    Provider { code: String, message: String },

    #[error("weather provider response contained no weather conditions")]
    NoConditions,
}

impl LookupError {
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::Transport(_) => "transport",
            LookupError::Decode(_) => "decode",
            LookupError::Provider { .. } => "provider",
            LookupError::NoConditions => "no_conditions",
        }
    }
}
