//! Tool surface exposed to the agent host.
//!
//! The host discovers tools through [`WeatherTools::specs`] and invokes them by
//! name with JSON arguments. Lookup failures are ordinary results
//! (`{"status": "error"}`); [`ToolError`] only covers host-side misuse.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

use crate::{lookup::WeatherLookup, sentiment::classify};

pub const GET_WEATHER_REPORT: &str = "get_weather_report";
pub const ANALYZE_SENTIMENT: &str = "analyze_sentiment";

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    #[error("invalid arguments for tool '{tool}': {source}")]
    InvalidArguments {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Tool definition for LLM function calling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// JSON schema of the arguments object.
    pub parameters: Value,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WeatherReportArgs {
    city: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AnalyzeSentimentArgs {
    text: String,
}

#[derive(Debug)]
pub struct WeatherTools {
    lookup: WeatherLookup,
}

impl WeatherTools {
    pub fn new(lookup: WeatherLookup) -> Self {
        Self { lookup }
    }

    pub fn specs() -> Vec<ToolSpec> {
        vec![
            ToolSpec {
                name: GET_WEATHER_REPORT.into(),
                description: "Retrieves the current weather report for a specified city.".into(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "city": {
                            "type": "string",
                            "description": "The city for which to get the weather report."
                        }
                    },
                    "required": ["city"]
                }),
            },
            ToolSpec {
                name: ANALYZE_SENTIMENT.into(),
                description: "Analyzes the sentiment of the given text.".into(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "text": {
                            "type": "string",
                            "description": "The text to analyze for sentiment."
                        }
                    },
                    "required": ["text"]
                }),
            },
        ]
    }

    pub async fn call(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        debug!(tool = name, "dispatching tool call");

        match name {
            GET_WEATHER_REPORT => {
                let args: WeatherReportArgs = parse_args(GET_WEATHER_REPORT, args)?;
                let report = self.lookup.report(&args.city).await;
                Ok(json!(report))
            }
            ANALYZE_SENTIMENT => {
                let args: AnalyzeSentimentArgs = parse_args(ANALYZE_SENTIMENT, args)?;
                Ok(json!(classify(&args.text)))
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}

fn parse_args<T: for<'de> Deserialize<'de>>(tool: &'static str, args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|source| ToolError::InvalidArguments { tool, source })
}
