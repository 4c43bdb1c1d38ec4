//! Location sharing session lifecycle.
//!
//! A session is either idle or actively sharing. Starting requires granted
//! location permission; stopping resets the elapsed counter but keeps the
//! last known position on screen.

mod manager;
mod types;


pub use manager::LocationSharingSession;
pub use types::{format_elapsed, SessionError, SessionSnapshot, SessionState};
