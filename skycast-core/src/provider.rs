use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::model::{Coordinate, WeatherObservation};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// One outbound request turning a coordinate into a current observation.
///
/// Implementations are idempotent and retry-free: a failure is terminal for
/// that fetch cycle and must be explicitly re-triggered by the caller.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch_current(
        &self,
        coordinate: &Coordinate,
    ) -> Result<WeatherObservation, FetchError>;
}
