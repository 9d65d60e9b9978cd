//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. CLI flags (applied by the caller, e.g. `--data-dir`)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$PASTELINE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/pasteline/config.toml`
//! 3. `~/.pasteline/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use pasteline::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! let paths = config.storage_paths(None).unwrap();
//! println!("Database: {}", paths.database_path().display());
//! println!("Time format: {}", config.time_format().as_str());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, StoreConfig};

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use super::paths::{StoragePaths, DEFAULT_BODIES, DEFAULT_DATABASE};
use super::types::TimeFormat;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "PASTELINE_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found; set data_dir or pass --data-dir")]
    NoHomeDir,
}

/// Loaded configuration.
///
/// Accessor methods apply defaults so callers never see `Option`s for
/// settings that always have a value.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Path to the config file (if one was loaded)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read,
    /// parsed, or validated. A missing config file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_global() {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let global: GlobalConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        global.validate()?;

        debug!("loaded config from {}", path.display());
        Ok(Self {
            global,
            path: Some(path.to_path_buf()),
        })
    }

    /// Locate the first existing global config file.
    fn find_global() -> Option<PathBuf> {
        // 1. Check $PASTELINE_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/pasteline/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("pasteline/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.pasteline/config.toml
        dirs::home_dir()
            .map(|home| home.join(".pasteline/config.toml"))
            .filter(|path| path.exists())
    }

    /// Path of the loaded config file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Time format for displayed timestamps.
    ///
    /// Defaults to `%x %X`. The value was validated at load time.
    pub fn time_format(&self) -> TimeFormat {
        self.global
            .time_format
            .as_deref()
            .and_then(|f| TimeFormat::new(f).ok())
            .unwrap_or_default()
    }

    /// Metadata database file name.
    pub fn database_name(&self) -> &str {
        self.global
            .store
            .as_ref()
            .and_then(|s| s.database.as_deref())
            .unwrap_or(DEFAULT_DATABASE)
    }

    /// Body directory name.
    pub fn bodies_name(&self) -> &str {
        self.global
            .store
            .as_ref()
            .and_then(|s| s.bodies.as_deref())
            .unwrap_or(DEFAULT_BODIES)
    }

    /// Resolve storage paths.
    ///
    /// `data_dir_override` (from the CLI) beats the config file, which
    /// beats `~/.pasteline/data`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDir` if nothing names a data directory
    /// and the home directory is unknown.
    pub fn storage_paths(
        &self,
        data_dir_override: Option<&Path>,
    ) -> Result<StoragePaths, ConfigError> {
        let data_dir = match data_dir_override {
            Some(dir) => dir.to_path_buf(),
            None => match &self.global.data_dir {
                Some(dir) => dir.clone(),
                None => StoragePaths::default_data_dir().ok_or(ConfigError::NoHomeDir)?,
            },
        };
        Ok(StoragePaths::new(data_dir).with_names(self.database_name(), self.bodies_name()))
    }
}
