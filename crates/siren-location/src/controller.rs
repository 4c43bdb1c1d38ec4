//! Hosting context for a sharing session: owns the session and its tick
//! timer, and reports lifecycle changes on the event bus.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use siren_common::{Event, EventBus, PermissionResult};
use siren_config::schema::LocationConfig;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

use crate::providers::CaptureError;
use crate::sample::PositionSample;
use crate::session::{LocationSharingSession, SessionError, SessionSnapshot};
use crate::timer::TickTimer;

/// Elapsed time is counted in whole seconds, one per tick.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

type CaptureResult = Result<PositionSample, CaptureError>;

/// A position capture running off the tick path.
struct PendingCapture {
    /// Started by [`SharingController::start`] rather than auto-track.
    initial: bool,
    handle: JoinHandle<CaptureResult>,
}

impl Drop for PendingCapture {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

enum Wake {
    Tick(Option<DateTime<Utc>>),
    Captured(bool, Result<CaptureResult, JoinError>),
}

/// Drives a [`LocationSharingSession`] from a one-second timer.
///
/// A timer is held only while the session is active. It is released on
/// [`stop`](Self::stop), on [`shutdown`](Self::shutdown), and when the
/// controller is dropped. Position captures run as separate tasks so a slow
/// provider never holds back the timer.
pub struct SharingController {
    session: LocationSharingSession,
    timer: Option<TickTimer>,
    tick_period: Duration,
    capture: Option<PendingCapture>,
    auto_track_every: u64,
    events: Arc<EventBus>,
}

impl SharingController {
    pub fn new(
        session: LocationSharingSession,
        config: &LocationConfig,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            session,
            timer: None,
            tick_period: TICK_PERIOD,
            capture: None,
            auto_track_every: u64::from(config.auto_track_interval_secs.max(1)),
            events,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    pub async fn request_permission(&self) -> PermissionResult {
        self.session.request_permission().await
    }

    /// Start the session and its tick timer, then kick off the initial
    /// capture in the background.
    ///
    /// Returns as soon as the session is active. The capture result is
    /// applied by [`next_tick`](Self::next_tick) or
    /// [`settle_capture`](Self::settle_capture).
    pub async fn start(&mut self) -> Result<(), SessionError> {
        let began = match self.session.begin(Utc::now()).await {
            Ok(began) => began,
            Err(e) => {
                self.events.publish(Event::PermissionDenied);
                return Err(e);
            }
        };

        if self.timer.is_none() {
            self.timer = Some(TickTimer::spawn(self.tick_period));
        }

        if began {
            if let Some(session_id) = self.session.session_id().cloned() {
                self.events.publish(Event::SharingStarted { session_id });
            }
            self.spawn_capture(true);
        }
        Ok(())
    }

    /// Release the timer and any in-flight capture, then stop the session.
    pub fn stop(&mut self) {
        self.release_timer();
        self.capture = None;

        let elapsed_seconds = self.session.elapsed_seconds();
        let session_id = self.session.session_id().cloned();
        self.session.stop();

        if let Some(session_id) = session_id {
            self.events.publish(Event::SharingStopped {
                session_id,
                elapsed_seconds,
            });
        }
    }

    /// Wait for the next timer tick and apply it. `None` when no timer is held.
    ///
    /// A capture that finishes while waiting is applied on the way.
    pub async fn next_tick(&mut self) -> Option<DateTime<Utc>> {
        loop {
            let wake = match (self.timer.as_mut(), self.capture.as_mut()) {
                (None, _) => return None,
                (Some(timer), None) => Wake::Tick(timer.tick().await),
                (Some(timer), Some(pending)) => tokio::select! {
                    now = timer.tick() => Wake::Tick(now),
                    joined = &mut pending.handle => Wake::Captured(pending.initial, joined),
                },
            };

            match wake {
                Wake::Tick(now) => {
                    let now = now?;
                    self.handle_tick(now);
                    return Some(now);
                }
                Wake::Captured(initial, joined) => {
                    self.capture = None;
                    self.finish_capture(initial, joined);
                }
            }
        }
    }

    /// Apply one tick: advance the session and start a refresh when
    /// auto-track is due.
    pub fn handle_tick(&mut self, now: DateTime<Utc>) {
        self.session.tick(now);

        if self.refresh_due() {
            if self.capture.is_some() {
                debug!("auto-track refresh skipped, capture still running");
            } else {
                self.spawn_capture(false);
            }
        }
    }

    /// Wait for the in-flight capture, if any, and apply it.
    pub async fn settle_capture(&mut self) {
        if let Some(mut pending) = self.capture.take() {
            let joined = (&mut pending.handle).await;
            self.finish_capture(pending.initial, joined);
        }
    }

    pub fn set_auto_track(&mut self, enabled: bool) {
        self.session.set_auto_track(enabled);
    }

    /// Tear down the hosting context.
    pub fn shutdown(&mut self) {
        info!("sharing controller shutting down");
        self.stop();
        self.events.publish(Event::Shutdown);
    }

    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    pub fn capture_pending(&self) -> bool {
        self.capture.is_some()
    }

    pub fn session(&self) -> &LocationSharingSession {
        &self.session
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    fn refresh_due(&self) -> bool {
        let elapsed = self.session.elapsed_seconds();
        self.session.is_active()
            && self.session.auto_track_enabled()
            && elapsed > 0
            && elapsed % self.auto_track_every == 0
    }

    fn spawn_capture(&mut self, initial: bool) {
        let handle = tokio::spawn(self.session.detached_capture());
        self.capture = Some(PendingCapture { initial, handle });
    }

    fn finish_capture(&mut self, initial: bool, joined: Result<CaptureResult, JoinError>) {
        let result = joined.unwrap_or_else(|e| {
            warn!(error = %e, "capture task ended abnormally");
            Err(CaptureError::Provider(format!("capture task failed: {e}")))
        });

        match self.session.apply_capture(result) {
            Ok(()) => self.publish_position(),
            Err(e) => {
                if initial && self.session.is_active() {
                    self.session.notify_position_unavailable();
                }
                self.events.publish(Event::CaptureFailed(e.to_string()));
            }
        }
    }

    fn release_timer(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
            debug!("sharing timer released");
        }
    }

    fn publish_position(&self) {
        if let Some(sample) = self.session.last_sample() {
            self.events.publish(Event::PositionCaptured {
                latitude: sample.latitude(),
                longitude: sample.longitude(),
                accuracy_meters: sample.accuracy_meters(),
            });
        }
    }
}
