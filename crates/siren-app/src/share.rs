//! `siren share`: run one sharing session against simulated services.

use std::sync::Arc;

use siren_common::{EventBus, PermissionResult, Result, SirenError};
use siren_config::SirenConfig;
use siren_location::{
    LocationProvider, LocationSharingSession, QueueSink, SharingController,
    SimulatedLocationProvider, StaticPermissionProvider,
};
use tracing::{debug, info, warn};

use crate::cli::ShareArgs;

pub async fn run(config: &SirenConfig, args: &ShareArgs) -> Result<()> {
    let answer = if args.deny {
        PermissionResult::Denied
    } else {
        PermissionResult::Granted
    };
    let locator: Arc<dyn LocationProvider> = if args.fail_capture {
        Arc::new(SimulatedLocationProvider::failing())
    } else {
        Arc::new(SimulatedLocationProvider::new(args.latitude, args.longitude))
    };

    let sink = QueueSink::new(config.notifications.queue_capacity as usize);

    let session = LocationSharingSession::from_config(
        &config.location,
        Arc::new(StaticPermissionProvider::new(answer)),
        locator,
        Arc::new(sink.clone()),
    );

    let events = Arc::new(EventBus::default());
    let mut event_rx = events.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = event_rx.recv().await {
            debug!(?event, "event");
        }
    });

    let mut controller = SharingController::new(session, &config.location, events);
    if args.auto_track {
        controller.set_auto_track(true);
    }

    let result = share(&mut controller, &sink, args.seconds).await;
    controller.shutdown();
    print_notifications(&sink);
    result
}

async fn share(controller: &mut SharingController, sink: &QueueSink, ticks: u64) -> Result<()> {
    if controller.start().await.is_err() {
        info!("location permission needed, asking");
        if controller.request_permission().await == PermissionResult::Denied {
            warn!("location permission denied, not sharing");
        }
        controller.start().await?;
    }
    print_notifications(sink);
    print_snapshot(controller)?;

    for _ in 0..ticks {
        if controller.next_tick().await.is_none() {
            break;
        }
        print_notifications(sink);
        print_snapshot(controller)?;
    }
    Ok(())
}

/// Flush queued notifications to stdout as `notice:` lines.
fn print_notifications(sink: &QueueSink) {
    for message in sink.take_all() {
        println!("notice: {message}");
    }
}

fn print_snapshot(controller: &SharingController) -> Result<()> {
    let json = serde_json::to_string(&controller.snapshot())
        .map_err(|e| SirenError::Other(format!("failed to serialize snapshot: {e}")))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share_args() -> ShareArgs {
        ShareArgs {
            seconds: 1,
            deny: false,
            auto_track: false,
            fail_capture: false,
            latitude: 37.7749,
            longitude: -122.4194,
        }
    }

    #[tokio::test]
    async fn granted_share_runs_to_completion() {
        assert!(run(&SirenConfig::default(), &share_args()).await.is_ok());
    }

    #[tokio::test]
    async fn denied_share_is_an_error() {
        let args = ShareArgs {
            deny: true,
            ..share_args()
        };
        let err = run(&SirenConfig::default(), &args).await.unwrap_err();
        assert!(matches!(err, SirenError::Session(_)));
    }

    #[tokio::test]
    async fn failing_capture_still_shares() {
        let args = ShareArgs {
            fail_capture: true,
            auto_track: true,
            ..share_args()
        };
        assert!(run(&SirenConfig::default(), &args).await.is_ok());
    }
}
