//! core::paths
//!
//! Centralized path routing for pasteline storage locations.
//!
//! # Storage Layout
//!
//! All data lives under one data directory:
//! - `pastes.db` - SQLite metadata store (name configurable)
//! - `pastes/` - one body file per paste id (name configurable)
//!
//! **Hard rule:** no code outside this module joins store names onto the
//! data directory. Everything goes through [`StoragePaths`].
//!
//! # Example
//!
//! ```
//! use pasteline::core::paths::StoragePaths;
//! use std::path::PathBuf;
//!
//! let paths = StoragePaths::new("/srv/paste");
//!
//! assert_eq!(paths.database_path(), PathBuf::from("/srv/paste/pastes.db"));
//! assert_eq!(paths.bodies_dir(), PathBuf::from("/srv/paste/pastes"));
//! ```

use std::path::{Path, PathBuf};

/// Default metadata database file name.
pub const DEFAULT_DATABASE: &str = "pastes.db";

/// Default body directory name.
pub const DEFAULT_BODIES: &str = "pastes";

/// Resolved storage locations for one data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    /// Root of all stored data.
    pub data_dir: PathBuf,
    database: String,
    bodies: String,
}

impl StoragePaths {
    /// Paths under `data_dir` with the default store names.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            database: DEFAULT_DATABASE.to_string(),
            bodies: DEFAULT_BODIES.to_string(),
        }
    }

    /// Override the store names.
    ///
    /// Names are expected to be validated by the config layer: relative,
    /// non-empty, and free of `..`.
    pub fn with_names(mut self, database: impl Into<String>, bodies: impl Into<String>) -> Self {
        self.database = database.into();
        self.bodies = bodies.into();
        self
    }

    /// The default data directory: `~/.pasteline/data`.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn default_data_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".pasteline").join("data"))
    }

    /// Path to the SQLite metadata database.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database)
    }

    /// Directory holding body files.
    pub fn bodies_dir(&self) -> PathBuf {
        self.data_dir.join(&self.bodies)
    }

    /// The data directory as a Path reference.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
