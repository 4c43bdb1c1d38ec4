//! Periodic tick source with an owned, cancellable handle.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// A background task that emits the wall-clock time once per period.
///
/// The task is aborted by [`cancel`](Self::cancel) or when the handle is
/// dropped, so a timer never outlives its owner.
pub struct TickTimer {
    period: Duration,
    handle: Option<JoinHandle<()>>,
    rx: mpsc::Receiver<DateTime<Utc>>,
}

impl TickTimer {
    /// Spawn on the current tokio runtime. The first tick arrives one full
    /// period after spawning.
    pub fn spawn(period: Duration) -> Self {
        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(tick_task(tx, period));
        debug!(?period, "tick timer started");
        Self {
            period,
            handle: Some(handle),
            rx,
        }
    }

    /// Wait for the next tick. `None` once the timer has been cancelled.
    pub async fn tick(&mut self) -> Option<DateTime<Utc>> {
        if self.handle.is_none() {
            return None;
        }
        self.rx.recv().await
    }

    /// Stop the background task. Safe to call more than once.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!(period = ?self.period, "tick timer cancelled");
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    #[cfg(test)]
    pub(crate) fn abort_handle(&self) -> Option<tokio::task::AbortHandle> {
        self.handle.as_ref().map(JoinHandle::abort_handle)
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn tick_task(tx: mpsc::Sender<DateTime<Utc>>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of a tokio interval completes immediately.
    interval.tick().await;
    loop {
        interval.tick().await;
        if tx.send(Utc::now()).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(10);

    #[tokio::test]
    async fn delivers_ticks_in_order() {
        let mut timer = TickTimer::spawn(PERIOD);
        let first = timer.tick().await.unwrap();
        let second = timer.tick().await.unwrap();
        assert!(second >= first);
        assert!(timer.is_active());
        assert_eq!(timer.period(), PERIOD);
    }

    #[tokio::test]
    async fn first_tick_waits_one_period() {
        let started = std::time::Instant::now();
        let mut timer = TickTimer::spawn(Duration::from_millis(50));
        timer.tick().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(45));
    }

    #[tokio::test]
    async fn cancel_stops_ticks() {
        let mut timer = TickTimer::spawn(PERIOD);
        timer.tick().await.unwrap();

        timer.cancel();
        assert!(!timer.is_active());
        assert!(timer.tick().await.is_none());

        // Idempotent.
        timer.cancel();
        assert!(!timer.is_active());
    }

    #[tokio::test]
    async fn cancel_releases_the_task() {
        let mut timer = TickTimer::spawn(PERIOD);
        timer.cancel();

        // Once the aborted task is dropped its sender goes with it, so the
        // channel drains to `None`.
        let drained = tokio::time::timeout(Duration::from_secs(1), async {
            while timer.rx.recv().await.is_some() {}
        })
        .await;
        assert!(drained.is_ok());
    }

    #[tokio::test]
    async fn dropping_the_timer_ends_its_task() {
        let timer = TickTimer::spawn(PERIOD);
        let task = timer.abort_handle().unwrap();
        assert!(!task.is_finished());

        drop(timer);
        wait_finished(&task).await;
    }
}

#[cfg(test)]
pub(crate) async fn wait_finished(task: &tokio::task::AbortHandle) {
    let finished = tokio::time::timeout(Duration::from_secs(1), async {
        while !task.is_finished() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(finished.is_ok(), "task still running");
}
