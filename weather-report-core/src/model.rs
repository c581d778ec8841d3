use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A city name as given by the caller. Not validated or normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city: String,
}

impl WeatherQuery {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    /// Condition group, e.g. "Rain" or "Clouds".
    pub condition: String,
    pub description: String,
    pub temperature_c: f64,
    pub observed_at: Option<DateTime<Utc>>,
}

/// Outcome of a single lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    Success(WeatherSnapshot),
    Failure(String),
}

impl LookupResult {
    pub fn is_success(&self) -> bool {
        matches!(self, LookupResult::Success(_))
    }

    pub fn into_report(self) -> ToolReport {
        match self {
            LookupResult::Success(snapshot) => ToolReport::success(format_report(&snapshot)),
            LookupResult::Failure(reason) => ToolReport::error(reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    Success,
    Error,
}

/// The `{status, report}` shape handed back to the agent host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolReport {
    pub status: ToolStatus,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub report: String,
}

impl ToolReport {
    pub fn success(report: impl Into<String>) -> Self {
        Self { status: ToolStatus::Success, report: report.into() }
    }

    pub fn error(report: impl Into<String>) -> Self {
        Self { status: ToolStatus::Error, report: report.into() }
    }
}

/// One-line human-readable report. Temperature is rounded to one decimal.
pub fn format_report(snapshot: &WeatherSnapshot) -> String {
    format!(
        "The weather in {} is {} with a temperature of {:.1} degrees Celsius.",
        snapshot.city, snapshot.description, snapshot.temperature_c
    )
}
