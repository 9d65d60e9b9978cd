//! store::traits
//!
//! Store trait definitions.
//!
//! # Design
//!
//! A paste lives in two places: a metadata row in a [`MetadataStore`]
//! and a body in a [`BlobStore`]. The stores share no transaction. The
//! repository layer decides what a failure in either one means.
//!
//! Implementations MUST:
//! - Be thread-safe (Send + Sync); one store handle serves concurrent callers
//! - Make a committed metadata row visible atomically
//! - Allocate ids atomically inside the metadata store itself

use thiserror::Error;

use crate::core::types::{PasteId, PasteMetadata, Timestamp};

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or opened.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Failed to read from the store.
    #[error("failed to read from store: {0}")]
    ReadError(String),

    /// Failed to write to the store.
    #[error("failed to write to store: {0}")]
    WriteError(String),

    /// Stored data could not be decoded into a valid value.
    /// A body is already stored for this paste; bodies are write-once.
    #[error("body of paste {0} already exists")]
    AlreadyExists(PasteId),

    #[error("corrupt store data: {0}")]
    Corrupt(String),

    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Relational record of paste attributes; the authority on which ids exist.
pub trait MetadataStore: Send + Sync {
    /// Insert a row and return the id the store assigned to it.
    ///
    /// Id allocation and the insert happen in one atomic step, so
    /// concurrent callers never observe the same id.
    fn insert(
        &self,
        title: &str,
        author: &str,
        created_at: Timestamp,
        edited_from: Option<PasteId>,
    ) -> Result<PasteId, StoreError>;

    /// Fetch one row, `Ok(None)` if absent.
    fn select_by_id(&self, id: PasteId) -> Result<Option<PasteMetadata>, StoreError>;

    /// Fetch every row. Order is up to the implementation.
    fn select_all(&self) -> Result<Vec<PasteMetadata>, StoreError>;
}

/// Raw body content keyed by paste id.
pub trait BlobStore: Send + Sync {
    /// Store the body for `id`.
    ///
    /// Bodies are write-once: if one is already stored for `id`, this
    /// fails with `StoreError::AlreadyExists` and leaves it untouched.
    /// The check and the write are a single atomic step.
    fn write(&self, id: PasteId, content: &str) -> Result<(), StoreError>;

    /// Fetch the body for `id`, `Ok(None)` if absent.
    fn read(&self, id: PasteId) -> Result<Option<String>, StoreError>;

    /// Check whether a body exists for `id`.
    ///
    /// Default implementation uses `read()` and checks for `Some`.
    fn exists(&self, id: PasteId) -> Result<bool, StoreError> {
        Ok(self.read(id)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = StoreError::Unavailable("pastes.db".into());
        assert!(err.to_string().contains("unavailable"));
        assert!(err.to_string().contains("pastes.db"));

        let err = StoreError::ReadError("disk".into());
        assert!(err.to_string().contains("read"));

        let err = StoreError::WriteError("full".into());
        assert!(err.to_string().contains("write"));

        let err = StoreError::AlreadyExists(PasteId::new(4).unwrap());
        assert_eq!(err.to_string(), "body of paste 4 already exists");

        let err = StoreError::Corrupt("id -1".into());
        assert!(err.to_string().contains("corrupt"));

        let err = StoreError::from(std::io::Error::other("boom"));
        assert!(err.to_string().starts_with("io:"));
    }
}
