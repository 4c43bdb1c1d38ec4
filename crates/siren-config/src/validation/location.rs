//! Validation for the location sharing section.

use crate::schema::SirenConfig;

use super::helpers::validate_range;

pub(crate) fn validate_location(errors: &mut Vec<String>, config: &SirenConfig) {
    let location = &config.location;

    validate_range(
        errors,
        "location.auto_track_interval_secs",
        location.auto_track_interval_secs,
        1,
        3600,
    );
}
