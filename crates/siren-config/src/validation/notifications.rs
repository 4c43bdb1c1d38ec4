use crate::schema::SirenConfig;

use super::helpers::validate_range;

pub(crate) fn validate_notifications(errors: &mut Vec<String>, config: &SirenConfig) {
    validate_range(
        errors,
        "notifications.queue_capacity",
        config.notifications.queue_capacity,
        1,
        256,
    );
}
