//! System configuration types: notifications and logging.

use serde::{Deserialize, Serialize};

/// In-app notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Maximum queued notifications (valid range: 1-256).
    pub queue_capacity: u32,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { queue_capacity: 16 }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// `EnvFilter` directive for the siren crates at this level.
    pub fn directive(self) -> &'static str {
        match self {
            Self::Debug => "siren=debug",
            Self::Info => "siren=info",
            Self::Warning => "siren=warn",
            Self::Error => "siren=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_directives() {
        assert_eq!(LogLevel::Debug.directive(), "siren=debug");
        assert_eq!(LogLevel::Info.directive(), "siren=info");
        assert_eq!(LogLevel::Warning.directive(), "siren=warn");
        assert_eq!(LogLevel::Error.directive(), "siren=error");
    }
}
