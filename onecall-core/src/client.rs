use std::str::FromStr;

use log::{debug, warn};

use crate::{
    error::{Error, UnknownPart},
    model::Response,
    transport::Transport,
};

const BASE_URL: &str = "https://api.openweathermap.org";
const API_VERSION: &str = "2.5";

/// Top-level sections of a One Call response that can be left out of a
/// request through the `exclude` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Current,
    Minutely,
    Hourly,
    Daily,
    Alerts,
}

impl Part {
    pub fn as_str(&self) -> &'static str {
        match self {
            Part::Current => "current",
            Part::Minutely => "minutely",
            Part::Hourly => "hourly",
            Part::Daily => "daily",
            Part::Alerts => "alerts",
        }
    }

    pub const fn all() -> &'static [Part] {
        &[
            Part::Current,
            Part::Minutely,
            Part::Hourly,
            Part::Daily,
            Part::Alerts,
        ]
    }
}

impl std::fmt::Display for Part {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Part {
    type Err = UnknownPart;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();

        Part::all()
            .iter()
            .copied()
            .find(|part| part.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownPart(value.to_string()))
    }
}

/// Client for the One Call endpoint.
///
/// Holds the API key, the unit system passed through as `units` and the
/// [`Transport`] used for the single GET each lookup performs. Nothing is
/// mutated after construction, so a client can be shared between tasks
/// whenever its transport can.
#[derive(Debug, Clone)]
pub struct OneCallClient<T> {
    transport: T,
    api_key: String,
    unit: String,
    exclude: Vec<Part>,
}

impl<T: Transport> OneCallClient<T> {
    /// `unit` is not validated. An empty string leaves `units` out of the
    /// query so the service falls back to its default (standard units).
    pub fn new(transport: T, api_key: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            unit: unit.into(),
            exclude: vec![Part::Hourly, Part::Daily],
        }
    }

    /// Replaces the list of excluded sections (hourly and daily by default).
    /// An empty list drops the `exclude` parameter altogether.
    pub fn with_exclude(mut self, parts: impl IntoIterator<Item = Part>) -> Self {
        self.exclude = parts.into_iter().collect();
        self
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn exclude(&self) -> &[Part] {
        &self.exclude
    }

    /// Current conditions (plus whatever sections are not excluded) for a
    /// location.
    pub async fn get_weather_from_lat_lon(&self, lat: f64, lon: f64) -> Result<Response, Error> {
        self.ensure_api_key()?;

        debug!("requesting One Call data for lat={lat} lon={lon}");
        self.fetch(&self.onecall_url(lat, lon)).await
    }

    /// Historical conditions for a location at the unix timestamp `time`,
    /// through the time machine endpoint.
    pub async fn get_historical_weather(
        &self,
        lat: f64,
        lon: f64,
        time: i64,
    ) -> Result<Response, Error> {
        self.ensure_api_key()?;

        debug!("requesting historical One Call data for lat={lat} lon={lon} dt={time}");
        self.fetch(&self.timemachine_url(lat, lon, time)).await
    }

    pub fn onecall_url(&self, lat: f64, lon: f64) -> String {
        let mut url = format!("{BASE_URL}/data/{API_VERSION}/onecall?lat={lat}&lon={lon}");

        if !self.exclude.is_empty() {
            let parts: Vec<&str> = self.exclude.iter().map(Part::as_str).collect();
            url.push_str("&exclude=");
            url.push_str(&parts.join(","));
        }

        self.push_credentials(&mut url);
        url
    }

    pub fn timemachine_url(&self, lat: f64, lon: f64, time: i64) -> String {
        let mut url = format!(
            "{BASE_URL}/data/{API_VERSION}/onecall/timemachine?lat={lat}&lon={lon}&dt={time}"
        );
        self.push_credentials(&mut url);
        url
    }

    fn push_credentials(&self, url: &mut String) {
        url.push_str("&appid=");
        url.push_str(&self.api_key);

        if !self.unit.is_empty() {
            url.push_str("&units=");
            url.push_str(&self.unit);
        }
    }

    fn ensure_api_key(&self) -> Result<(), Error> {
        if self.api_key.is_empty() {
            return Err(Error::MissingApiKey);
        }
        Ok(())
    }

    async fn fetch(&self, url: &str) -> Result<Response, Error> {
        let body = self.transport.get(url).await?;

        serde_json::from_slice(&body).map_err(|e| {
            warn!("failed to decode One Call response ({} bytes): {e}", body.len());
            Error::Decode(e)
        })
    }
}
