//! Core library for the `weather-report` agent tools.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather current-weather lookup and its error taxonomy
//! - A keyword-based sentiment classifier
//! - The tool surface (names, JSON schemas, dispatch) handed to an agent host
//!
//! It is used by `weather-report-cli`, but can also be embedded directly by an agent host.

pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;
pub mod sentiment;
pub mod tool;

pub use config::{Config, OpenWeatherConfig};
pub use error::LookupError;
pub use lookup::WeatherLookup;
pub use model::{LookupResult, ToolReport, ToolStatus, WeatherQuery, WeatherSnapshot, format_report};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use sentiment::{Sentiment, SentimentLabel, classify};
pub use tool::{ToolError, ToolSpec, WeatherTools};
