use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LocationError;

/// A latitude/longitude pair identifying a point on Earth's surface.
///
/// Produced once per acquisition cycle and consumed by the fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::Unavailable(format!(
                "coordinates out of range: {latitude}, {longitude}"
            )));
        }
        Ok(Self { latitude, longitude })
    }
}

/// Weather main-category values the presentation layer distinguishes.
///
/// Everything outside the six named conditions, including the literal
/// `Mist` the service can report, collapses into [`WeatherCategory::Other`]
/// and gets the shared fallback presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherCategory {
    Clear,
    Clouds,
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Other,
}

impl WeatherCategory {
    /// Case-insensitive parse of the service's `weather[0].main` value.
    pub fn from_wire(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "clear" => Self::Clear,
            "clouds" => Self::Clouds,
            "thunderstorm" => Self::Thunderstorm,
            "drizzle" => Self::Drizzle,
            "rain" => Self::Rain,
            "snow" => Self::Snow,
            _ => Self::Other,
        }
    }
}

/// One current-conditions reading for a coordinate.
///
/// Exactly one observation is "current" at a time; each successful fetch
/// replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    pub temperature_c: f64,
    pub category: WeatherCategory,
    /// The category exactly as the service sent it, used as the display title.
    pub raw_category: String,
    pub description: String,
    pub icon_code: String,
    pub observed_at: DateTime<Utc>,
}

/// Rounded Celsius reading for display. `-0` is normalized to `0`.
pub fn format_temperature(temperature_c: f64) -> String {
    format!("{} ℃", temperature_c.round() as i64)
}
