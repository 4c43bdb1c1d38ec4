//! Where the config file lives, and writing the commented default.

use siren_common::ConfigError;
use std::path::{Path, PathBuf};
use tracing::info;

use super::template::default_config_toml;

const APP_DIR: &str = "siren";
const CONFIG_FILE: &str = "config.toml";

/// `<platform config dir>/siren/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or(ConfigError::NoConfigDir)
}

/// Write the commented default config to `path`, creating parent
/// directories as needed.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_err = |at: &Path| {
        let path = at.to_path_buf();
        move |source| ConfigError::Write { path, source }
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err(parent))?;
    }
    std::fs::write(path, default_config_toml()).map_err(write_err(path))?;

    info!(path = %path.display(), "wrote default config");
    Ok(())
}
