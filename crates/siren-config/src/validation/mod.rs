//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod helpers;
mod location;
mod notifications;


use crate::schema::SirenConfig;
use siren_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &SirenConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    location::validate_location(&mut errors, config);
    notifications::validate_notifications(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
