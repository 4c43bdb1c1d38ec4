//! A single point-in-time position reading.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Why a reading was rejected at construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SampleError {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
    #[error("accuracy {0} m must be a non-negative finite number")]
    Accuracy(f64),
}

/// One capture from the location provider.
///
/// Fields are private so every instance has passed [`PositionSample::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionSample {
    latitude: f64,
    longitude: f64,
    accuracy_meters: f64,
    captured_at: DateTime<Utc>,
}

impl PositionSample {
    pub fn new(
        latitude: f64,
        longitude: f64,
        accuracy_meters: f64,
        captured_at: DateTime<Utc>,
    ) -> Result<Self, SampleError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(SampleError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(SampleError::Longitude(longitude));
        }
        if !accuracy_meters.is_finite() || accuracy_meters < 0.0 {
            return Err(SampleError::Accuracy(accuracy_meters));
        }
        Ok(Self {
            latitude,
            longitude,
            accuracy_meters,
            captured_at,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn accuracy_meters(&self) -> f64 {
        self.accuracy_meters
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// `"37.77490, -122.41940"`
    pub fn coordinates_label(&self) -> String {
        format!("{:.5}, {:.5}", self.latitude, self.longitude)
    }

    /// `"±12 m"`
    pub fn accuracy_label(&self) -> String {
        format!("±{:.0} m", self.accuracy_meters)
    }

    /// Link a contact can open to see this position on a map.
    pub fn maps_url(&self) -> String {
        format!(
            "https://maps.google.com/?q={:.6},{:.6}",
            self.latitude, self.longitude
        )
    }
}
