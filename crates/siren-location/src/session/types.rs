//! Session state, errors, and the read-only snapshot handed to the UI.

use chrono::{DateTime, Utc};
use serde::Serialize;
use siren_common::SessionId;

use crate::sample::PositionSample;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Idle,
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("location permission has not been granted")]
    PermissionDenied,
}

impl From<SessionError> for siren_common::SirenError {
    fn from(err: SessionError) -> Self {
        Self::Session(err.to_string())
    }
}

/// Everything the Location screen needs to render, detached from the session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub session_id: Option<SessionId>,
    pub started_at: Option<DateTime<Utc>>,
    pub elapsed_seconds: u64,
    pub elapsed_label: String,
    pub last_sample: Option<PositionSample>,
    pub auto_track_enabled: bool,
}

/// `MM:SS`, or `H:MM:SS` once an hour has passed.
pub fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}
