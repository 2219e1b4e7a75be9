//! Permission and coordinate acquisition.
//!
//! The host surfaces — consent dialog and positioning backend — are traits so
//! the acquisition sequence can be exercised without a real platform behind it.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::LocationError;
use crate::model::Coordinate;

pub mod geoip;

/// Outcome of a consent query or request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

/// Host consent surface for the location capability.
#[async_trait]
pub trait PermissionGate: Send + Sync + Debug {
    /// Current consent state, without prompting.
    async fn status(&self) -> PermissionStatus;

    /// Prompt the user; returns the state after the prompt.
    async fn request(&self) -> PermissionStatus;
}

/// Host positioning surface.
#[async_trait]
pub trait LocationSensor: Send + Sync + Debug {
    async fn current_coordinate(&self) -> Result<Coordinate, LocationError>;
}

#[async_trait]
impl<T: LocationSensor + ?Sized> LocationSensor for Box<T> {
    async fn current_coordinate(&self) -> Result<Coordinate, LocationError> {
        (**self).current_coordinate().await
    }
}

/// Obtain consent and a coordinate: check, request at most once, re-check,
/// then read the sensor.
///
/// A denial after the single request fails with
/// [`LocationError::PermissionDenied`] without ever touching the sensor.
/// Sensor failures surface as [`LocationError::Unavailable`]. There is no
/// polling and no retry; one user decision per acquisition cycle.
pub async fn acquire_coordinate<G, S>(gate: &G, sensor: &S) -> Result<Coordinate, LocationError>
where
    G: PermissionGate + ?Sized,
    S: LocationSensor + ?Sized,
{
    let mut status = gate.status().await;

    if !status.is_granted() {
        status = gate.request().await;
    }

    if !status.is_granted() {
        return Err(LocationError::PermissionDenied);
    }

    sensor.current_coordinate().await
}

/// Gate that is always granted. Network-based positioning needs no OS consent.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGate;

#[async_trait]
impl PermissionGate for OpenGate {
    async fn status(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn request(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }
}

/// Sensor backed by a fixed coordinate, from config or CLI flags.
#[derive(Debug, Clone)]
pub struct FixedSensor {
    coordinate: Coordinate,
}

impl FixedSensor {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl LocationSensor for FixedSensor {
    async fn current_coordinate(&self) -> Result<Coordinate, LocationError> {
        Ok(self.coordinate)
    }
}
