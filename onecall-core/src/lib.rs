//! Client library for the OpenWeatherMap One Call API.
//!
//! This crate defines:
//! - A [`Transport`] abstraction over the single HTTP GET a lookup needs,
//!   with a `reqwest`-backed default
//! - [`OneCallClient`], which builds the request URL and decodes the reply
//! - The typed response model (current, hourly and minutely observations)
//!
//! It is used by `onecall-cli`, but carries no configuration of its own: the
//! API key and unit system are supplied by the embedding application.

pub mod client;
pub mod error;
pub mod model;
pub mod transport;

pub use client::{OneCallClient, Part};
pub use error::{Error, TransportError, UnknownPart};
pub use model::{
    Clouds, Coordinate, MainReadings, Observation, Precipitation, Response, SunTimes,
    TimezoneInfo, UvIndex, WeatherCondition, Wind,
};
pub use transport::{HttpTransport, Transport};
