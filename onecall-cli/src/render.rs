use std::fmt::Write;

use chrono::{DateTime, FixedOffset, Utc};
use onecall_core::{Observation, Response};

/// Temperature and wind speed suffixes for a `units` value.
fn unit_labels(unit: &str) -> (&'static str, &'static str) {
    match unit {
        "metric" => ("°C", "m/s"),
        "imperial" => ("°F", "mph"),
        _ => ("K", "m/s"),
    }
}

fn local_time(at: Option<DateTime<Utc>>, offset: Option<FixedOffset>) -> String {
    let Some(utc) = at else {
        return "-".to_string();
    };

    match offset {
        Some(offset) => utc
            .with_timezone(&offset)
            .format("%Y-%m-%d %H:%M %:z")
            .to_string(),
        None => utc.format("%Y-%m-%d %H:%M UTC").to_string(),
    }
}

fn unix_time(ts: u32) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(i64::from(ts), 0)
}

/// Human-readable report of a response.
pub fn summary(response: &Response, unit: &str) -> String {
    let (temp_unit, speed_unit) = unit_labels(unit);
    let offset = response.local_offset();
    let current = &response.current;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Location: {}, {} ({})",
        response.coordinate.lat, response.coordinate.lon, response.timezone_info.name
    );
    let _ = writeln!(out, "Observed: {}", local_time(current.observed_at(), offset));
    write_conditions(&mut out, current);
    let _ = writeln!(
        out,
        "Temperature: {:.1}{temp_unit} (feels like {:.1}{temp_unit})",
        current.main_readings.temp, current.main_readings.feels_like
    );
    let _ = writeln!(
        out,
        "Humidity: {}%  Pressure: {} hPa  Clouds: {}%",
        current.main_readings.humidity,
        current.main_readings.pressure,
        current.clouds.coverage_percent
    );
    let _ = writeln!(
        out,
        "Wind: {:.1} {speed_unit} from {}°  UV index: {:.1}",
        current.wind.speed, current.wind.direction_deg, current.uv_index.value
    );

    let rain = current.precipitation;
    if rain.last_hour > 0.0 || rain.last_three_hours > 0.0 {
        let _ = writeln!(
            out,
            "Rain: {:.2} mm last hour, {:.2} mm last 3 hours",
            rain.last_hour, rain.last_three_hours
        );
    }

    if current.sun_times.sunrise != 0 {
        let _ = writeln!(
            out,
            "Sunrise: {}  Sunset: {}",
            local_time(unix_time(current.sun_times.sunrise), offset),
            local_time(unix_time(current.sun_times.sunset), offset)
        );
    }

    if !response.hourly.is_empty() || !response.minutely.is_empty() {
        let _ = writeln!(
            out,
            "Forecast entries: {} hourly, {} minutely",
            response.hourly.len(),
            response.minutely.len()
        );
    }

    out
}

/// Primary condition first, any further ones on an extra line.
fn write_conditions(out: &mut String, observation: &Observation) {
    let Some(primary) = observation.condition() else {
        let _ = writeln!(out, "Condition: Unknown");
        return;
    };

    let _ = writeln!(out, "Condition: {} ({})", primary.description, primary.main);

    let others: Vec<&str> = observation
        .conditions
        .iter()
        .skip(1)
        .map(|c| c.description.as_str())
        .collect();
    if !others.is_empty() {
        let _ = writeln!(out, "Also: {}", others.join(", "));
    }
}
