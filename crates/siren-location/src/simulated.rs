//! In-process stand-ins for the platform permission and location services.
//!
//! Used by the `siren` binary and by tests; nothing here touches real
//! device sensors.

use std::collections::VecDeque;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use siren_common::{AccuracyHint, PermissionResult, PermissionStatus};
use tokio::sync::Mutex;
use tracing::debug;

use crate::providers::{CaptureError, LocationProvider, PermissionProvider};
use crate::sample::PositionSample;

// ---------------------------------------------------------------------------
// Permission
// ---------------------------------------------------------------------------

/// Permission service with a fixed answer to prompts.
pub struct StaticPermissionProvider {
    status: Mutex<PermissionStatus>,
    answer: PermissionResult,
}

impl StaticPermissionProvider {
    /// Starts `Undetermined`; prompts resolve to `answer`.
    pub fn new(answer: PermissionResult) -> Self {
        Self {
            status: Mutex::new(PermissionStatus::Undetermined),
            answer,
        }
    }

    pub fn granted() -> Self {
        Self {
            status: Mutex::new(PermissionStatus::Granted),
            answer: PermissionResult::Granted,
        }
    }

    pub fn denied() -> Self {
        Self {
            status: Mutex::new(PermissionStatus::Denied),
            answer: PermissionResult::Denied,
        }
    }

    /// Simulate the user changing the permission in system settings.
    pub async fn set_status(&self, status: PermissionStatus) {
        *self.status.lock().await = status;
    }
}

#[async_trait]
impl PermissionProvider for StaticPermissionProvider {
    async fn query_status(&self) -> PermissionStatus {
        *self.status.lock().await
    }

    async fn request(&self) -> PermissionResult {
        *self.status.lock().await = self.answer.into();
        self.answer
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Replays a fixed sequence of capture results, then reports `Unavailable`.
#[derive(Default)]
pub struct ScriptedLocationProvider {
    script: Mutex<VecDeque<Result<PositionSample, CaptureError>>>,
}

impl ScriptedLocationProvider {
    pub fn new(script: impl IntoIterator<Item = Result<PositionSample, CaptureError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }

    pub async fn push(&self, result: Result<PositionSample, CaptureError>) {
        self.script.lock().await.push_back(result);
    }

    pub async fn remaining(&self) -> usize {
        self.script.lock().await.len()
    }
}

#[async_trait]
impl LocationProvider for ScriptedLocationProvider {
    async fn capture_once(&self, _accuracy: AccuracyHint) -> Result<PositionSample, CaptureError> {
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or(Err(CaptureError::Unavailable))
    }
}

/// Reports positions scattered around a fixed point, stamped with the
/// current time.
pub struct SimulatedLocationProvider {
    latitude: f64,
    longitude: f64,
    fail: bool,
}

impl SimulatedLocationProvider {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            fail: false,
        }
    }

    /// Every capture fails with `Unavailable`.
    pub fn failing() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            fail: true,
        }
    }
}

/// Meters per degree of latitude, close enough for jitter.
const METERS_PER_DEGREE: f64 = 111_320.0;

#[async_trait]
impl LocationProvider for SimulatedLocationProvider {
    async fn capture_once(&self, accuracy: AccuracyHint) -> Result<PositionSample, CaptureError> {
        if self.fail {
            return Err(CaptureError::Unavailable);
        }

        let radius = accuracy.nominal_radius_m();
        let (dlat, dlon, reported) = {
            let mut rng = rand::thread_rng();
            (
                rng.gen_range(-radius..=radius) / METERS_PER_DEGREE,
                rng.gen_range(-radius..=radius) / METERS_PER_DEGREE,
                rng.gen_range(radius * 0.5..=radius),
            )
        };

        let latitude = (self.latitude + dlat).clamp(-90.0, 90.0);
        let longitude = (self.longitude + dlon).clamp(-180.0, 180.0);
        debug!(latitude, longitude, reported, "simulated capture");
        Ok(PositionSample::new(latitude, longitude, reported, Utc::now())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn undetermined_until_requested() {
        let provider = StaticPermissionProvider::new(PermissionResult::Granted);
        assert_eq!(provider.query_status().await, PermissionStatus::Undetermined);

        assert_eq!(provider.request().await, PermissionResult::Granted);
        assert_eq!(provider.query_status().await, PermissionStatus::Granted);
    }

    #[tokio::test]
    async fn denied_prompt_updates_status() {
        let provider = StaticPermissionProvider::new(PermissionResult::Denied);
        assert_eq!(provider.request().await, PermissionResult::Denied);
        assert_eq!(provider.query_status().await, PermissionStatus::Denied);
    }

    #[tokio::test]
    async fn status_can_be_revoked() {
        let provider = StaticPermissionProvider::granted();
        provider.set_status(PermissionStatus::Denied).await;
        assert_eq!(provider.query_status().await, PermissionStatus::Denied);
    }

    #[tokio::test]
    async fn scripted_replays_in_order_then_unavailable() {
        let first = PositionSample::new(1.0, 2.0, 3.0, Utc::now()).unwrap();
        let provider =
            ScriptedLocationProvider::new([Ok(first.clone()), Err(CaptureError::Timeout)]);
        assert_eq!(provider.remaining().await, 2);

        let hint = AccuracyHint::High;
        assert_eq!(provider.capture_once(hint).await, Ok(first));
        assert_eq!(provider.capture_once(hint).await, Err(CaptureError::Timeout));
        assert_eq!(
            provider.capture_once(hint).await,
            Err(CaptureError::Unavailable)
        );
    }

    #[tokio::test]
    async fn simulated_stays_near_base_point() {
        let provider = SimulatedLocationProvider::new(37.7749, -122.4194);
        for hint in [AccuracyHint::Low, AccuracyHint::Balanced, AccuracyHint::High] {
            let sample = provider.capture_once(hint).await.unwrap();
            let max_offset = hint.nominal_radius_m() / METERS_PER_DEGREE + 1e-9;
            assert!((sample.latitude() - 37.7749).abs() <= max_offset);
            assert!((sample.longitude() + 122.4194).abs() <= max_offset);
            assert!(sample.accuracy_meters() <= hint.nominal_radius_m());
        }
    }

    #[tokio::test]
    async fn failing_simulation_reports_unavailable() {
        let provider = SimulatedLocationProvider::failing();
        assert_eq!(
            provider.capture_once(AccuracyHint::Balanced).await,
            Err(CaptureError::Unavailable)
        );
    }
}
