//! store
//!
//! Storage backends for paste metadata and bodies.
//!
//! # Architecture
//!
//! A paste is split across two independent stores:
//!
//! - [`MetadataStore`]: relational rows `(id, title, author, created_at,
//!   edited_from)`; allocates ids and defines which pastes exist
//! - [`BlobStore`]: raw body text keyed by paste id
//!
//! Implementations:
//!
//! - [`SqliteMetadataStore`]: SQLite database file (default)
//! - [`FileBlobStore`]: one file per body (default)
//! - [`MemoryMetadataStore`] / [`MemoryBlobStore`]: in-process, for tests
//!
//! # Example
//!
//! ```no_run
//! use pasteline::core::paths::StoragePaths;
//! use pasteline::store::open_stores;
//!
//! let paths = StoragePaths::new("/var/lib/pasteline");
//! let (metadata, blobs) = open_stores(&paths).unwrap();
//! ```

mod file_store;
mod memory;
mod sqlite;
mod traits;

pub use file_store::FileBlobStore;
pub use memory::{MemoryBlobStore, MemoryMetadataStore};
pub use sqlite::SqliteMetadataStore;
pub use traits::{BlobStore, MetadataStore, StoreError};

use crate::core::paths::StoragePaths;

/// Open the default durable store pair under `paths`.
///
/// # Errors
///
/// Returns `StoreError::Unavailable` if either location cannot be
/// created or opened.
pub fn open_stores(
    paths: &StoragePaths,
) -> Result<(SqliteMetadataStore, FileBlobStore), StoreError> {
    let metadata = SqliteMetadataStore::open(paths.database_path())?;
    let blobs = FileBlobStore::open(paths.bodies_dir())?;
    Ok((metadata, blobs))
}
