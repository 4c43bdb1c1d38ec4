//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use siren_common::{AccuracyHint, ConfigError};
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_siren_config.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[location]
accuracy = "high"
auto_track_interval_secs = 60
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.location.accuracy, AccuracyHint::High);
    assert_eq!(config.location.auto_track_interval_secs, 60);
    // Defaults preserved
    assert!(!config.location.auto_track);
    assert_eq!(config.notifications.queue_capacity, 16);
}

#[test]
fn retired_tick_interval_key_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[location]\ntick_interval_ms = 100\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert!(crate::validation::validate(&config).is_ok());
    assert!(!crate::config_to_json(&config).contains("tick_interval"));
}

#[test]
fn unreadable_path_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory exists at the path, so reading it as a file fails.
    let result = load_from_path(dir.path());
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn create_default_config_reports_write_failure() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("siren");
    std::fs::write(&blocker, "not a directory").unwrap();

    let result = create_default_config(&blocker.join("config.toml"));
    assert!(matches!(result, Err(ConfigError::Write { .. })));
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_unknown_accuracy_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[location]\naccuracy = \"pinpoint\"\n").unwrap();

    assert!(matches!(
        load_from_path(&path),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn load_config_with_invalid_values_is_returned_as_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[location]\nauto_track_interval_secs = 0\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.location.auto_track_interval_secs, 0);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("siren").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.location.auto_track_interval_secs, 30);
    assert_eq!(config.location.accuracy, AccuracyHint::Balanced);
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;
    use crate::schema::SirenConfig;

    let config: SirenConfig = toml::from_str(default_config_toml()).unwrap();
    assert!(crate::validation::validate(&config).is_ok());
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("siren"));
        assert!(path_str.ends_with("config.toml"));
    }
}
