//! Typed view of a One Call response.
//!
//! Every struct is `#[serde(default)]`: the service omits fields freely
//! (hourly entries carry no `sunrise`, minutely entries carry little more than
//! `dt`), and a missing field decodes to its zero value. Fields that are not
//! modeled here (`daily`, `alerts`, `dew_point`, `visibility`, ...) are dropped.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimezoneInfo {
    #[serde(rename = "timezone")]
    pub name: String,
    /// Shift from UTC in seconds.
    #[serde(rename = "timezone_offset")]
    pub offset_seconds: i32,
}

/// Sunrise and sunset as unix timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SunTimes {
    pub sunrise: u32,
    pub sunset: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i32,
    pub humidity: i32,
}

/// One entry of the `weather` array.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherCondition {
    pub id: i32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Clouds {
    pub coverage_percent: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    #[serde(rename = "wind_speed")]
    pub speed: f32,
    #[serde(rename = "wind_deg")]
    pub direction_deg: u16,
}

/// Rain volume in millimetres, as reported under the `rain` object of the
/// current and hourly sections. The bare-number shape used by daily entries
/// is not supported.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Precipitation {
    #[serde(rename = "3h")]
    pub last_three_hours: f64,
    #[serde(rename = "1h")]
    pub last_hour: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UvIndex {
    pub value: f32,
}

/// The recurring shape of the `current`, `hourly` and `minutely` sections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Observation {
    #[serde(rename = "dt")]
    pub timestamp: i64,
    #[serde(flatten)]
    pub sun_times: SunTimes,
    #[serde(flatten)]
    pub main_readings: MainReadings,
    #[serde(flatten)]
    pub wind: Wind,
    #[serde(rename = "rain")]
    pub precipitation: Precipitation,
    pub clouds: Clouds,
    #[serde(rename = "uvi")]
    pub uv_index: UvIndex,
    #[serde(rename = "weather")]
    pub conditions: Vec<WeatherCondition>,
}

impl Observation {
    /// The primary condition, when the service listed any.
    pub fn condition(&self) -> Option<&WeatherCondition> {
        self.conditions.first()
    }

    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Response {
    #[serde(flatten)]
    pub coordinate: Coordinate,
    #[serde(flatten)]
    pub timezone_info: TimezoneInfo,
    pub current: Observation,
    /// Empty when hourly data was excluded from the request.
    pub hourly: Vec<Observation>,
    /// Empty when minutely data was excluded or is unavailable for the location.
    pub minutely: Vec<Observation>,
}

impl Response {
    /// Offset of the queried location, or `None` if the service reported an
    /// out-of-range value.
    pub fn local_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.timezone_info.offset_seconds)
    }
}
