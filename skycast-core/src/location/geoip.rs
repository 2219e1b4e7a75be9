use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, header};
use serde::Deserialize;

use super::LocationSensor;
use crate::error::LocationError;
use crate::model::Coordinate;

const GEOIP_URL: &str = "https://ipapi.co/json/";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct GeoIpBody {
    latitude: f64,
    longitude: f64,
    city: Option<String>,
    region_code: Option<String>,
}

/// IP-based positioning. A coarse, city-level position is plenty for
/// current-conditions weather, and it needs no OS consent dialog.
#[derive(Debug, Clone)]
pub struct GeoIpSensor {
    client: Client,
    url: String,
}

impl GeoIpSensor {
    pub fn new() -> Result<Self, LocationError> {
        Self::with_url(GEOIP_URL.to_string())
    }

    /// Point the sensor at a different lookup server; used by tests.
    pub fn with_url(url: String) -> Result<Self, LocationError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl LocationSensor for GeoIpSensor {
    async fn current_coordinate(&self) -> Result<Coordinate, LocationError> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| LocationError::Unavailable(e.to_string()))?
            .json::<GeoIpBody>()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        debug!(
            "geoip position: {:.4}, {:.4} ({}, {})",
            body.latitude,
            body.longitude,
            body.city.as_deref().unwrap_or("?"),
            body.region_code.as_deref().unwrap_or("?"),
        );

        Coordinate::new(body.latitude, body.longitude)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn parses_lookup_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "city": "Masan",
                "region_code": "48",
                "latitude": 35.26,
                "longitude": 128.61,
            })))
            .mount(&server)
            .await;

        let sensor = GeoIpSensor::with_url(server.uri()).unwrap();
        let coordinate = sensor.current_coordinate().await.unwrap();

        assert_eq!(coordinate.latitude, 35.26);
        assert_eq!(coordinate.longitude, 128.61);
    }

    #[tokio::test]
    async fn lookup_failure_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let sensor = GeoIpSensor::with_url(server.uri()).unwrap();
        let err = sensor.current_coordinate().await.unwrap_err();

        assert!(matches!(err, LocationError::Unavailable(_)));
    }

    #[tokio::test]
    async fn out_of_range_lookup_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "latitude": 512.0,
                "longitude": 0.0,
            })))
            .mount(&server)
            .await;

        let sensor = GeoIpSensor::with_url(server.uri()).unwrap();
        assert!(sensor.current_coordinate().await.is_err());
    }
}
