//! store::file_store
//!
//! File-based body storage.
//!
//! # Layout
//!
//! - One file per paste: `<dir>/<id>`
//! - Writes are atomic (unique temp file in the same directory, fsync,
//!   then hard link into place), so a reader sees either no body or the
//!   whole body
//! - Bodies are write-once: linking fails if `<dir>/<id>` exists, so
//!   concurrent writers for one id cannot replace each other
//! - Bodies are read back as UTF-8; invalid UTF-8 is reported as corrupt
//!
//! # Example
//!
//! ```ignore
//! use pasteline::store::{BlobStore, FileBlobStore};
//!
//! let store = FileBlobStore::open("/var/lib/pasteline/pastes")?;
//! store.write(id, "hello")?;
//! assert_eq!(store.read(id)?.as_deref(), Some("hello"));
//! ```

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::traits::{BlobStore, StoreError};
use crate::core::types::PasteId;

/// Body store keeping one file per paste in a directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    /// Directory holding the body files
    dir: PathBuf,
}

impl FileBlobStore {
    /// Open a body store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            StoreError::Unavailable(format!("cannot create {}: {e}", dir.display()))
        })?;
        Ok(Self { dir })
    }

    /// Create a body store at `dir` without touching the filesystem.
    ///
    /// The directory is created on first write.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the body files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the body file for `id`.
    pub fn path_for(&self, id: PasteId) -> PathBuf {
        self.dir.join(id.to_string())
    }
}

impl BlobStore for FileBlobStore {
    fn write(&self, id: PasteId, content: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| StoreError::WriteError(format!("cannot create directory: {e}")))?;

        let temp_path = self
            .dir
            .join(format!(".{id}.{}.tmp", uuid::Uuid::new_v4().simple()));

        {
            let mut file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&temp_path)
                .map_err(|e| StoreError::WriteError(format!("cannot create temp file: {e}")))?;

            let written = file
                .write_all(content.as_bytes())
                .and_then(|()| file.sync_all());
            if let Err(e) = written {
                let _ = fs::remove_file(&temp_path);
                return Err(StoreError::WriteError(format!(
                    "cannot write body of paste {id}: {e}"
                )));
            }
        }

        // Unlike rename, hard_link never replaces an existing target.
        let linked = fs::hard_link(&temp_path, self.path_for(id));
        let _ = fs::remove_file(&temp_path);
        match linked {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(StoreError::AlreadyExists(id)),
            Err(e) => Err(StoreError::WriteError(format!(
                "cannot link body of paste {id} into place: {e}"
            ))),
        }
    }

    fn read(&self, id: PasteId) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(id)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => Err(StoreError::Corrupt(format!(
                "body of paste {id} is not valid UTF-8"
            ))),
            Err(e) => Err(StoreError::ReadError(format!(
                "cannot read body of paste {id}: {e}"
            ))),
        }
    }

    fn exists(&self, id: PasteId) -> Result<bool, StoreError> {
        Ok(self.path_for(id).is_file())
    }
}
