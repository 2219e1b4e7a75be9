//! The single-screen controller: owns the lifecycle state and runs the
//! acquire → fetch chain, sequentially, one cycle at a time.

use log::warn;

use crate::error::CycleError;
use crate::location::{LocationSensor, PermissionGate, acquire_coordinate};
use crate::model::WeatherObservation;
use crate::provider::WeatherFetcher;

/// Lifecycle of the weather screen.
///
/// `Loading → Ready → Refreshing → Ready | Failed`. A failure before the
/// first success carries no stale observation; a failure afterwards keeps
/// the last good one renderable.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenPhase {
    /// Nothing fetched yet.
    Loading,
    Ready(WeatherObservation),
    /// A re-fetch is running; the stale observation stays visible.
    Refreshing(WeatherObservation),
    Failed {
        alert: String,
        stale: Option<WeatherObservation>,
    },
}

/// What a refresh trigger did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Completed,
    Failed,
    /// A cycle was already in flight; the trigger was dropped.
    AlreadyRunning,
}

#[derive(Debug)]
pub struct Screen<G, S, F> {
    gate: G,
    sensor: S,
    fetcher: F,
    phase: ScreenPhase,
    in_flight: bool,
}

impl<G, S, F> Screen<G, S, F>
where
    G: PermissionGate,
    S: LocationSensor,
    F: WeatherFetcher,
{
    pub fn new(gate: G, sensor: S, fetcher: F) -> Self {
        Self {
            gate,
            sensor,
            fetcher,
            phase: ScreenPhase::Loading,
            in_flight: false,
        }
    }

    pub fn phase(&self) -> &ScreenPhase {
        &self.phase
    }

    /// The currently renderable observation, if any. During a refresh or
    /// after a post-load failure this is the stale one.
    pub fn observation(&self) -> Option<&WeatherObservation> {
        match &self.phase {
            ScreenPhase::Loading => None,
            ScreenPhase::Ready(o) | ScreenPhase::Refreshing(o) => Some(o),
            ScreenPhase::Failed { stale, .. } => stale.as_ref(),
        }
    }

    /// True until the first fetch has ever succeeded.
    pub fn is_loading(&self) -> bool {
        self.observation().is_none()
    }

    pub fn is_refreshing(&self) -> bool {
        matches!(self.phase, ScreenPhase::Refreshing(_))
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Run one full acquire → fetch cycle and update the phase.
    ///
    /// Re-entry while a cycle is in flight is a no-op, so rapid repeated
    /// triggers cannot race on the screen state.
    pub async fn refresh_cycle(&mut self) -> CycleOutcome {
        if self.in_flight {
            return CycleOutcome::AlreadyRunning;
        }
        self.in_flight = true;

        // stale-while-revalidate: the last good observation stays renderable
        // for the whole cycle
        if let Some(stale) = self.observation().cloned() {
            self.phase = ScreenPhase::Refreshing(stale);
        }

        let outcome = match self.run_cycle().await {
            Ok(observation) => {
                self.phase = ScreenPhase::Ready(observation);
                CycleOutcome::Completed
            }
            Err(err) => {
                warn!("weather cycle failed: {err}");
                let stale = self.observation().cloned();
                self.phase = ScreenPhase::Failed {
                    alert: err.alert_message().to_string(),
                    stale,
                };
                CycleOutcome::Failed
            }
        };

        self.in_flight = false;
        outcome
    }

    async fn run_cycle(&self) -> Result<WeatherObservation, CycleError> {
        let coordinate = acquire_coordinate(&self.gate, &self.sensor).await?;
        let observation = self.fetcher.fetch_current(&coordinate).await?;
        Ok(observation)
    }

    #[cfg(test)]
    fn mark_in_flight(&mut self) {
        self.in_flight = true;
    }
}
