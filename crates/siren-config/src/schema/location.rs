//! Location sharing configuration types.

use serde::{Deserialize, Serialize};
use siren_common::AccuracyHint;

/// Location sharing settings.
///
/// The elapsed-time tick runs on a fixed one-second cadence and is not
/// configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Precision requested from the location provider.
    pub accuracy: AccuracyHint,
    /// Initial state of the auto-track toggle.
    pub auto_track: bool,
    /// Seconds between position refreshes while auto-tracking (valid range: 1-3600).
    pub auto_track_interval_secs: u32,
    /// Show a notification when sharing starts or stops.
    pub notify_on_change: bool,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            accuracy: AccuracyHint::Balanced,
            auto_track: false,
            auto_track_interval_secs: 30,
            notify_on_change: true,
        }
    }
}
