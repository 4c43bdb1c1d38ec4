//! The location sharing state machine: start, stop, tick, and captures.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use siren_common::{AccuracyHint, PermissionResult, SessionId};
use siren_config::schema::LocationConfig;
use tracing::{debug, info, warn};

use crate::providers::{CaptureError, LocationProvider, NotificationSink, PermissionProvider};
use crate::sample::PositionSample;

use super::types::{format_elapsed, SessionError, SessionSnapshot, SessionState};

// ---------------------------------------------------------------------------
// Location Sharing Session
// ---------------------------------------------------------------------------

/// Tracks whether the user's location is being shared, for how long, and
/// where they were last seen.
///
/// Owned by exactly one host; not shared across tasks.
pub struct LocationSharingSession {
    permissions: Arc<dyn PermissionProvider>,
    locator: Arc<dyn LocationProvider>,
    sink: Arc<dyn NotificationSink>,
    accuracy: AccuracyHint,
    notify_on_change: bool,

    state: SessionState,
    session_id: Option<SessionId>,
    started_at: Option<DateTime<Utc>>,
    elapsed_seconds: u64,
    last_sample: Option<PositionSample>,
    auto_track: bool,
}

impl LocationSharingSession {
    /// Creates an idle session with balanced accuracy and auto-track off.
    pub fn new(
        permissions: Arc<dyn PermissionProvider>,
        locator: Arc<dyn LocationProvider>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            permissions,
            locator,
            sink,
            accuracy: AccuracyHint::default(),
            notify_on_change: true,
            state: SessionState::Idle,
            session_id: None,
            started_at: None,
            elapsed_seconds: 0,
            last_sample: None,
            auto_track: false,
        }
    }

    /// Creates an idle session configured from the `[location]` section.
    pub fn from_config(
        config: &LocationConfig,
        permissions: Arc<dyn PermissionProvider>,
        locator: Arc<dyn LocationProvider>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let mut session = Self::new(permissions, locator, sink);
        session.accuracy = config.accuracy;
        session.notify_on_change = config.notify_on_change;
        session.auto_track = config.auto_track;
        session
    }

    pub fn with_accuracy(mut self, accuracy: AccuracyHint) -> Self {
        self.accuracy = accuracy;
        self
    }

    /// Forward a permission prompt to the platform.
    pub async fn request_permission(&self) -> PermissionResult {
        let result = self.permissions.request().await;
        info!(?result, "location permission requested");
        result
    }

    /// Begin sharing and capture an initial position.
    ///
    /// Calling this while already active is a no-op that returns `Ok(())`.
    /// A failed initial capture does not undo the transition; the session
    /// stays active and keeps whatever sample it had before.
    pub async fn start(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if self.begin(now).await? && self.refresh().await.is_err() {
            self.notify_position_unavailable();
        }
        Ok(())
    }

    /// The state transition half of [`start`](Self::start), without the
    /// capture.
    ///
    /// Returns `Ok(true)` when the session went from idle to active and
    /// `Ok(false)` when it was already active. Hosts that must not wait on
    /// the location provider call this, then run
    /// [`detached_capture`](Self::detached_capture) on their own schedule.
    pub async fn begin(&mut self, now: DateTime<Utc>) -> Result<bool, SessionError> {
        if self.state == SessionState::Active {
            debug!("start ignored, sharing already active");
            return Ok(false);
        }

        let status = self.permissions.query_status().await;
        if !status.is_granted() {
            warn!(?status, "cannot start sharing without location permission");
            return Err(SessionError::PermissionDenied);
        }

        let session_id = SessionId::new();
        info!(session = session_id.short(), "location sharing started");
        self.state = SessionState::Active;
        self.session_id = Some(session_id);
        self.started_at = Some(now);
        self.elapsed_seconds = 0;

        if self.notify_on_change {
            self.sink.notify("Location sharing started");
        }
        Ok(true)
    }

    /// Stop sharing. The last sample stays available for display.
    pub fn stop(&mut self) {
        if self.state == SessionState::Idle {
            return;
        }

        info!(
            session = self.session_id.as_ref().map(SessionId::short).unwrap_or_default(),
            elapsed = self.elapsed_seconds,
            "location sharing stopped"
        );
        self.state = SessionState::Idle;
        self.session_id = None;
        self.started_at = None;
        self.elapsed_seconds = 0;

        if self.notify_on_change {
            self.sink.notify("Location sharing stopped");
        }
    }

    /// Advance the elapsed counter by one second while active.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if self.state != SessionState::Active {
            return;
        }
        self.elapsed_seconds += 1;
        debug!(elapsed = self.elapsed_seconds, %now, "sharing tick");
    }

    pub fn set_auto_track(&mut self, enabled: bool) {
        if self.auto_track != enabled {
            debug!(enabled, "auto-track toggled");
        }
        self.auto_track = enabled;
    }

    /// Capture the current position once and store it.
    pub async fn refresh(&mut self) -> Result<(), CaptureError> {
        let result = self.detached_capture().await;
        self.apply_capture(result)
    }

    /// A capture future that borrows nothing from the session, so it can be
    /// spawned and its result handed back through
    /// [`apply_capture`](Self::apply_capture).
    pub fn detached_capture(
        &self,
    ) -> impl Future<Output = Result<PositionSample, CaptureError>> + Send + 'static {
        let locator = Arc::clone(&self.locator);
        let accuracy = self.accuracy;
        async move { locator.capture_once(accuracy).await }
    }

    /// Store a finished capture, or log why there is nothing to store.
    pub fn apply_capture(
        &mut self,
        result: Result<PositionSample, CaptureError>,
    ) -> Result<(), CaptureError> {
        match result {
            Ok(sample) => {
                self.record_sample(sample);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, accuracy = %self.accuracy, "position capture failed");
                Err(e)
            }
        }
    }

    /// Tell the user sharing is on even though the first capture failed.
    pub fn notify_position_unavailable(&self) {
        self.sink
            .notify("Sharing is on, but your current position could not be determined");
    }

    /// Store a capture that completed outside of [`start`](Self::start).
    ///
    /// Returns `false` when the sample is older than the one already held.
    pub fn record_sample(&mut self, sample: PositionSample) -> bool {
        if let Some(last) = &self.last_sample {
            if sample.captured_at() < last.captured_at() {
                debug!(
                    captured_at = %sample.captured_at(),
                    latest = %last.captured_at(),
                    "discarding out-of-order sample"
                );
                return false;
            }
        }
        debug!(
            position = %sample.coordinates_label(),
            accuracy = %sample.accuracy_label(),
            "position recorded"
        );
        self.last_sample = Some(sample);
        true
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    pub fn last_sample(&self) -> Option<&PositionSample> {
        self.last_sample.as_ref()
    }

    pub fn auto_track_enabled(&self) -> bool {
        self.auto_track
    }

    pub fn accuracy(&self) -> AccuracyHint {
        self.accuracy
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            session_id: self.session_id.clone(),
            started_at: self.started_at,
            elapsed_seconds: self.elapsed_seconds,
            elapsed_label: format_elapsed(self.elapsed_seconds),
            last_sample: self.last_sample.clone(),
            auto_track_enabled: self.auto_track,
        }
    }
}
