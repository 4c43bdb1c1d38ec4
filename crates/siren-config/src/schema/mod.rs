//! Configuration schema types for Siren.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod location;
mod system;

pub use location::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Siren.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct SirenConfig {
    pub location: LocationConfig,
    pub notifications: NotificationsConfig,
    pub logging: LoggingConfig,
}
