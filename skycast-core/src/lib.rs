//! Core library for the `skycast` weather viewer.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - Location permission and coordinate acquisition
//! - The OpenWeather fetch client
//! - The category → presentation mapping and the screen state machine
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod presentation;
pub mod provider;
pub mod screen;

pub use config::Config;
pub use error::{CycleError, FetchError, LocationError};
pub use model::{Coordinate, WeatherCategory, WeatherObservation};
pub use presentation::{Descriptor, Rgb, StatusStyle};
pub use provider::{OpenWeatherProvider, WeatherFetcher};
pub use screen::{CycleOutcome, Screen, ScreenPhase};
