//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Siren Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[location]
# accuracy = "balanced"            # low, balanced, high
# auto_track = false
# auto_track_interval_secs = 30    # 1-3600
# notify_on_change = true

[notifications]
# queue_capacity = 16              # 1-256

[logging]
# level = "INFO"                   # DEBUG, INFO, WARNING, ERROR
"##
}
