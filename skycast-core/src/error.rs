use thiserror::Error;

/// Failures while acquiring permission and a coordinate.
#[derive(Debug, Error)]
pub enum LocationError {
    /// The user declined the location capability, both before and after the
    /// single request attempt.
    #[error("location permission denied")]
    PermissionDenied,

    /// The positioning backend failed after permission was granted.
    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// Failures while fetching a weather observation.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure or a non-2xx status from the weather service.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx response missing the fields we rely on.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Umbrella over everything that can end one acquire → fetch cycle.
///
/// All variants are terminal for that cycle: nothing is retried, the user
/// re-triggers a refresh manually.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl CycleError {
    /// One-line alert shown to the user. The exact failure kind is logged,
    /// not displayed.
    pub fn alert_message(&self) -> &'static str {
        match self {
            CycleError::Location(_) => "Could not access your location.",
            CycleError::Fetch(_) => "Could not fetch the weather.",
        }
    }
}
