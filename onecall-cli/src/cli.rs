use anyhow::{Context, anyhow};
use chrono::DateTime;
use clap::{ArgAction, Parser, Subcommand};
use inquire::{CustomType, Password, PasswordDisplayMode, Select};
use log::info;
use onecall_core::{Error, HttpTransport, OneCallClient, Part, Response};

use crate::{
    config::{Config, DEFAULT_TIMEOUT_SECS},
    render,
};

const UNITS: &[&str] = &["metric", "imperial", "standard"];

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "onecall", version, about = "OpenWeatherMap One Call CLI")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store API key, unit system and timeout.
    Configure,

    /// Show weather for a coordinate.
    Show {
        #[arg(allow_negative_numbers = true)]
        lat: f64,

        #[arg(allow_negative_numbers = true)]
        lon: f64,

        /// Historical lookup at an RFC 3339 date/time or unix timestamp;
        /// if absent, means "now".
        #[arg(long)]
        at: Option<String>,

        /// Sections to leave out, e.g. `--exclude daily,alerts`. Defaults to
        /// hourly and daily.
        #[arg(long, value_delimiter = ',')]
        exclude: Option<Vec<Part>>,

        /// Print the decoded response as JSON.
        #[arg(long)]
        json: bool,

        /// Overrides the configured API key.
        #[arg(long)]
        api_key: Option<String>,

        /// Overrides the configured unit system.
        #[arg(long)]
        unit: Option<String>,

        /// Overrides the configured timeout, in seconds.
        #[arg(long)]
        timeout: Option<u64>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                lat,
                lon,
                at,
                exclude,
                json,
                api_key,
                unit,
                timeout,
            } => {
                let config = Config::load()?.with_overrides(api_key, unit, timeout);
                let lookup = Lookup {
                    lat,
                    lon,
                    time: at.as_deref().map(parse_time).transpose()?,
                    exclude,
                };

                let response = fetch(&config, &lookup).await?;
                let unit = config.unit.as_deref().unwrap_or_default();

                if json {
                    println!("{}", serde_json::to_string_pretty(&response)?);
                } else {
                    print!("{}", render::summary(&response, unit));
                }
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    let cursor = config
        .unit
        .as_deref()
        .and_then(|u| UNITS.iter().position(|known| *known == u))
        .unwrap_or(0);
    let unit = Select::new("Unit system:", UNITS.to_vec())
        .with_starting_cursor(cursor)
        .prompt()?;

    let timeout = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
        .with_error_message("Please enter a whole number of seconds")
        .prompt()?;

    config.api_key = Some(api_key);
    config.unit = Some(unit.to_string());
    config.timeout_secs = Some(timeout);

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

/// What `show` asks the service for.
#[derive(Debug)]
struct Lookup {
    lat: f64,
    lon: f64,
    time: Option<i64>,
    exclude: Option<Vec<Part>>,
}

async fn fetch(config: &Config, lookup: &Lookup) -> anyhow::Result<Response> {
    let transport =
        HttpTransport::new(config.timeout_secs()).context("Failed to build HTTP client")?;
    let mut client = OneCallClient::new(
        transport,
        config.api_key.clone().unwrap_or_default(),
        config.unit.clone().unwrap_or_default(),
    );
    if let Some(parts) = &lookup.exclude {
        client = client.with_exclude(parts.iter().copied());
    }

    let (lat, lon) = (lookup.lat, lookup.lon);
    let result = match lookup.time {
        Some(dt) => {
            info!("fetching historical weather for {lat},{lon} at {dt}");
            client.get_historical_weather(lat, lon, dt).await
        }
        None => {
            info!("fetching current weather for {lat},{lon}");
            client.get_weather_from_lat_lon(lat, lon).await
        }
    };

    result.map_err(|e| match e {
        Error::MissingApiKey => anyhow!(
            "No API key configured.\n\
             Hint: run `onecall configure` or pass --api-key."
        ),
        other => {
            anyhow::Error::new(other).context("Failed to fetch weather from OpenWeatherMap")
        }
    })
}

/// Accepts unix seconds or an RFC 3339 date/time.
fn parse_time(value: &str) -> anyhow::Result<i64> {
    if let Ok(ts) = value.parse::<i64>() {
        return Ok(ts);
    }

    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.timestamp())
        .with_context(|| {
            format!("Invalid --at value '{value}': expected unix seconds or RFC 3339")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_time_accepts_unix_seconds() {
        assert_eq!(parse_time("1586468027").unwrap(), 1586468027);
    }

    #[test]
    fn parse_time_accepts_rfc3339() {
        assert_eq!(parse_time("2020-04-09T21:33:47Z").unwrap(), 1586468027);
        assert_eq!(parse_time("2020-04-10T00:33:47+03:00").unwrap(), 1586468027);
    }

    #[test]
    fn parse_time_rejects_garbage() {
        let err = parse_time("yesterday").unwrap_err();
        assert!(err.to_string().contains("Invalid --at value"));
    }

    #[test]
    fn show_accepts_negative_coordinates() {
        let args = ["onecall", "-v", "show", "33.44", "-94.04", "--unit", "metric"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Command::Show { lat, lon, unit, at, .. } => {
                assert_eq!(lat, 33.44);
                assert_eq!(lon, -94.04);
                assert_eq!(unit.as_deref(), Some("metric"));
                assert!(at.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_parses_exclude_list() {
        let args = ["onecall", "show", "1", "2", "--exclude", "daily,alerts"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Command::Show { exclude, .. } => {
                assert_eq!(exclude, Some(vec![Part::Daily, Part::Alerts]));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_rejects_unknown_part() {
        let args = ["onecall", "show", "1", "2", "--exclude", "weekly"];
        let err = Cli::try_parse_from(args).unwrap_err();

        assert!(err.to_string().contains("Unknown part 'weekly'"));
    }

    #[tokio::test]
    async fn fetch_without_api_key_hints_at_configure() {
        let lookup = Lookup {
            lat: 60.99,
            lon: 30.9,
            time: None,
            exclude: Some(vec![Part::Daily]),
        };
        let err = fetch(&Config::default(), &lookup).await.unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API key configured"));
        assert!(msg.contains("onecall configure"));
    }
}
