use boorumux_common::log::debug;
use directories::ProjectDirs;
use std::{
    env,
    fs::{create_dir_all, read_to_string, File},
    io::Write,
    path::{Path, PathBuf},
};

use super::Config;
use crate::error::ConfigError;

/// Written to the config path the first time it is loaded.
pub const SAMPLE_CONFIG: &str = include_str!("sample.toml");

/// Overrides [`Config::default_path`] when set.
pub const CONFIG_PATH_ENV: &str = "BOORUMUX_CONFIG";

impl Config {
    /// Where the configuration is read from when no path is given:
    /// `$BOORUMUX_CONFIG` if set, otherwise `config.toml` inside the
    /// platform's config directory (`$XDG_CONFIG_HOME/boorumux` on Linux).
    ///
    /// # Errors
    /// Fails when the platform has no notion of a config directory.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let dirs = ProjectDirs::from("", "", "boorumux").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Reads the configuration at `path`, writing the sample configuration
    /// there first if it doesn't exist yet.
    ///
    /// # Errors
    /// Fails when the file can't be created or read, or isn't a valid configuration.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if !path.exists() {
            debug!("Creating sample config at {}", path.display());

            if let Some(parent) = path.parent() {
                create_dir_all(parent).map_err(io_err)?;
            }

            let mut sample = File::create(path).map_err(io_err)?;
            sample.write_all(SAMPLE_CONFIG.as_bytes()).map_err(io_err)?;
        }

        let contents = read_to_string(path).map_err(io_err)?;
        debug!("Reading config from {}", path.display());

        Self::from_toml(&contents)
    }
}
