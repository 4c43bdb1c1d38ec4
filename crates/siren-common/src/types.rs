use serde::{Deserialize, Serialize};
use std::fmt;

/// Location permission as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// The user has not been asked yet.
    Undetermined,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Outcome of an explicit permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionResult {
    Granted,
    Denied,
}

impl From<PermissionResult> for PermissionStatus {
    fn from(result: PermissionResult) -> Self {
        match result {
            PermissionResult::Granted => Self::Granted,
            PermissionResult::Denied => Self::Denied,
        }
    }
}

/// Requested precision for a single position capture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccuracyHint {
    Low,
    #[default]
    Balanced,
    High,
}

impl AccuracyHint {
    /// Typical accuracy radius in meters a provider reaches at this hint.
    pub fn nominal_radius_m(self) -> f64 {
        match self {
            Self::Low => 500.0,
            Self::Balanced => 50.0,
            Self::High => 5.0,
        }
    }
}

impl fmt::Display for AccuracyHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Balanced => write!(f, "balanced"),
            Self::High => write!(f, "high"),
        }
    }
}
