//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing: store names must be plain
//! relative names and the time format must be a pattern chrono accepts.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::TimeFormat;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// data_dir = "/var/lib/pasteline"
/// time_format = "%Y-%m-%d %H:%M"
///
/// [store]
/// database = "pastes.db"
/// bodies = "pastes"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Root directory for all stored data
    pub data_dir: Option<PathBuf>,

    /// strftime pattern for displayed timestamps
    pub time_format: Option<String>,

    /// Store file names under `data_dir`
    pub store: Option<StoreConfig>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.data_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "data_dir cannot be empty".to_string(),
                ));
            }
        }

        if let Some(format) = &self.time_format {
            TimeFormat::new(format.as_str())
                .map_err(|e| ConfigError::InvalidValue(format!("time_format: {e}")))?;
        }

        if let Some(store) = &self.store {
            store.validate()?;
        }

        Ok(())
    }
}

/// Store file names, relative to the data directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Metadata database file name
    pub database: Option<String>,

    /// Body directory name
    pub bodies: Option<String>,
}

impl StoreConfig {
    /// Validate the store names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(database) = &self.database {
            validate_store_name("store.database", database)?;
        }
        if let Some(bodies) = &self.bodies {
            validate_store_name("store.bodies", bodies)?;
        }
        if self.database.is_some() && self.database == self.bodies {
            return Err(ConfigError::InvalidValue(
                "store.database and store.bodies must differ".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_store_name(key: &str, name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::InvalidValue(format!("{key} cannot be empty")));
    }
    let plain = Path::new(name)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !plain {
        return Err(ConfigError::InvalidValue(format!(
            "{key} must be a relative name without '..': '{name}'"
        )));
    }
    Ok(())
}
