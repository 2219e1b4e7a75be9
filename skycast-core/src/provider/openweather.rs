use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use super::WeatherFetcher;
use crate::error::FetchError;
use crate::model::{Coordinate, WeatherCategory, WeatherObservation};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Client for OpenWeather's current-conditions endpoint. Units are fixed to
/// metric; no retries, no timeout beyond the HTTP client default.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the provider at a different server; used by tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    async fn fetch(&self, coordinate: &Coordinate) -> Result<WeatherObservation, FetchError> {
        let url = format!("{}/weather", self.base_url);

        let body = self
            .http
            .get(&url)
            .query(&[
                ("lat", coordinate.latitude.to_string()),
                ("lon", coordinate.longitude.to_string()),
                ("units", "metric".to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

        let entry = parsed
            .weather
            .first()
            .ok_or_else(|| FetchError::MalformedResponse("empty weather list".to_string()))?;

        let observed_at = parsed
            .dt
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .unwrap_or_else(Utc::now);

        debug!(
            "observation: {} {:.2}°C at {:.4}, {:.4}",
            entry.main, parsed.main.temp, coordinate.latitude, coordinate.longitude
        );

        Ok(WeatherObservation {
            temperature_c: parsed.main.temp,
            category: WeatherCategory::from_wire(&entry.main),
            raw_category: entry.main.clone(),
            description: entry.description.clone(),
            icon_code: entry.icon.clone(),
            observed_at,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    dt: Option<i64>,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[async_trait]
impl WeatherFetcher for OpenWeatherProvider {
    async fn fetch_current(
        &self,
        coordinate: &Coordinate,
    ) -> Result<WeatherObservation, FetchError> {
        self.fetch(coordinate).await
    }
}
