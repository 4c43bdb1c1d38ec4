//! Contracts for the platform services a sharing session calls out to.

use async_trait::async_trait;
use siren_common::{AccuracyHint, PermissionResult, PermissionStatus};

use crate::sample::{PositionSample, SampleError};

/// Platform location-permission service.
#[async_trait]
pub trait PermissionProvider: Send + Sync {
    /// Current permission without prompting the user.
    async fn query_status(&self) -> PermissionStatus;

    /// Prompt the user (if the platform allows it) and report the answer.
    async fn request(&self) -> PermissionResult;
}

/// Platform positioning service.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn capture_once(&self, accuracy: AccuracyHint) -> Result<PositionSample, CaptureError>;
}

/// User-visible feedback channel. Fire-and-forget: no acknowledgment.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str);
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CaptureError {
    #[error("location services unavailable")]
    Unavailable,
    #[error("position capture timed out")]
    Timeout,
    #[error("provider error: {0}")]
    Provider(String),
    #[error("invalid sample: {0}")]
    InvalidSample(#[from] SampleError),
}

impl From<CaptureError> for siren_common::SirenError {
    fn from(err: CaptureError) -> Self {
        Self::Capture(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_error_display() {
        assert_eq!(
            CaptureError::Unavailable.to_string(),
            "location services unavailable"
        );
        assert_eq!(CaptureError::Timeout.to_string(), "position capture timed out");
        assert_eq!(
            CaptureError::Provider("gps off".into()).to_string(),
            "provider error: gps off"
        );
    }

    #[test]
    fn capture_error_from_sample_error() {
        let err: CaptureError = SampleError::Accuracy(-3.0).into();
        assert!(matches!(err, CaptureError::InvalidSample(_)));
        assert!(err.to_string().contains("-3"));
    }

    #[test]
    fn capture_error_into_siren_error() {
        let err: siren_common::SirenError = CaptureError::Timeout.into();
        assert_eq!(err.to_string(), "capture error: position capture timed out");
    }
}
