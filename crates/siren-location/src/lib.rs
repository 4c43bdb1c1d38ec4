//! Location sharing for Siren.
//!
//! - [`LocationSharingSession`]: the idle/active state machine behind the
//!   Location screen
//! - [`SharingController`]: hosts a session and its tick timer
//! - provider traits for the platform permission, positioning, and
//!   notification services, plus simulated implementations

pub mod controller;
pub mod providers;
pub mod sample;
pub mod session;
pub mod simulated;
pub mod sink;
pub mod timer;

pub use controller::{SharingController, TICK_PERIOD};
pub use providers::{CaptureError, LocationProvider, NotificationSink, PermissionProvider};
pub use sample::{PositionSample, SampleError};
pub use session::{LocationSharingSession, SessionError, SessionSnapshot, SessionState};
pub use simulated::{ScriptedLocationProvider, SimulatedLocationProvider, StaticPermissionProvider};
pub use sink::QueueSink;
pub use timer::TickTimer;
