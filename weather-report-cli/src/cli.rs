use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use weather_report_core::{
    Config, OpenWeatherProvider, ToolStatus, WeatherLookup, WeatherTools, classify,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-report", version, about = "Weather report and sentiment tools for LLM agents")]
pub struct Cli {
    /// OpenWeather API key; overrides the one stored in the config file.
    #[arg(long, env = "OWM_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Log filter, e.g. "debug" or "weather_report_core=trace".
    #[arg(long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather credentials. Prompts for the key unless --api-key is given.
    Configure {
        #[arg(long)]
        base_url: Option<String>,

        /// Request timeout in seconds; must be at least 1.
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout_secs: Option<u64>,
    },

    /// Show the current weather for a city.
    Report {
        city: String,

        /// Print the `{status, report}` JSON handed to agent hosts.
        #[arg(long)]
        json: bool,
    },

    /// Classify the sentiment of a piece of text.
    Sentiment {
        text: String,

        #[arg(long)]
        json: bool,
    },

    /// List the tool definitions as JSON.
    Tools,

    /// Invoke a tool by name with a JSON arguments object.
    Call {
        name: String,

        /// e.g. '{"city": "Hangzhou"}'
        args: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let Cli { api_key, command, .. } = self;

        match command {
            Command::Configure { base_url, timeout_secs } => {
                let mut config = Config::load()?;

                let api_key = match api_key {
                    Some(key) => key,
                    None => inquire::Password::new("OpenWeather API key:")
                        .without_confirmation()
                        .prompt()
                        .context("Failed to read API key")?,
                };
                config.set_openweather_api_key(api_key);

                if let Some(base_url) = base_url {
                    config.openweather.base_url = base_url;
                }
                if let Some(timeout_secs) = timeout_secs {
                    config.openweather.timeout_secs = timeout_secs;
                }

                // Reject settings the provider can't be built from before persisting them.
                OpenWeatherProvider::builder(config.openweather_api_key()?)
                    .base_url(&config.openweather.base_url)
                    .build()?;

                config.save()?;
                println!("Saved configuration to {}", Config::config_file_path()?.display());
            }
            Command::Report { city, json } => {
                let lookup = WeatherLookup::from_config(&load_config(api_key)?)?;
                let report = lookup.report(&city).await;

                if json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    match report.status {
                        ToolStatus::Success => println!("{}", report.report),
                        ToolStatus::Error => bail!("{}", report.report),
                    }
                }
            }
            Command::Sentiment { text, json } => {
                let sentiment = classify(&text);

                if json {
                    println!("{}", serde_json::to_string_pretty(&sentiment)?);
                } else {
                    println!("{} (confidence {:.2})", sentiment.label, sentiment.confidence);
                }
            }
            Command::Tools => {
                println!("{}", serde_json::to_string_pretty(&WeatherTools::specs())?);
            }
            Command::Call { name, args } => {
                let args: serde_json::Value = serde_json::from_str(&args)
                    .context("Tool arguments must be a JSON object")?;

                let lookup = WeatherLookup::from_config(&load_config(api_key)?)?;
                let output = WeatherTools::new(lookup).call(&name, args).await?;
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }

        Ok(())
    }
}

/// Config file contents with the command-line / environment key taking precedence.
fn load_config(api_key: Option<String>) -> anyhow::Result<Config> {
    let mut config = Config::load()?;
    if let Some(key) = api_key {
        config.set_openweather_api_key(key);
    }
    Ok(config)
}
