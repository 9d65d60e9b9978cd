//! repository
//!
//! The paste repository: one create/read contract over two stores.
//!
//! # Consistency
//!
//! `create` is two sequential writes with no shared transaction:
//!
//! 1. Insert the metadata row. The store allocates the id atomically.
//!    Once this commits, the paste exists.
//! 2. Write the body keyed by that id.
//!
//! If step 2 fails the row stays, and the caller gets
//! [`PasteError::PartialWrite`] carrying the id. The caller may retry
//! only the body half, through [`PasteRepository::restore_body`]. Until
//! the body lands, `read` reports [`PasteError::NotFound`] while
//! `read_metadata`, search, and lineage still see the paste.
//!
//! # Concurrency
//!
//! The repository holds no mutable state of its own and takes no locks.
//! Share it across threads behind an `Arc`; id uniqueness comes from the
//! metadata store.
//!
//! # Example
//!
//! ```
//! use pasteline::core::types::NewPaste;
//! use pasteline::repository::PasteRepository;
//! use pasteline::store::{MemoryBlobStore, MemoryMetadataStore};
//!
//! let repo = PasteRepository::new(MemoryMetadataStore::new(), MemoryBlobStore::new());
//!
//! let original = repo.create(&NewPaste::new("notes", "ada", "v1", None).unwrap()).unwrap();
//! let edit = repo
//!     .create(&NewPaste::new("notes", "bob", "v2", Some(original)).unwrap())
//!     .unwrap();
//!
//! assert_eq!(repo.read(edit).unwrap().body, "v2");
//! let family = repo.family(edit).unwrap();
//! assert_eq!(family.paste.id, original);
//! ```

use log::{debug, warn};
use thiserror::Error;

use crate::core::lineage::{Family, LineageError, LineageIndex};
use crate::core::search::{search, SearchQuery, SearchResult};
use crate::core::types::{NewPaste, Paste, PasteId, PasteMetadata, TimeFormat, Timestamp, TypeError};
use crate::core::verify::{self, VerifyResult};
use crate::store::{BlobStore, MetadataStore, StoreError};

/// Errors surfaced to callers of the repository.
#[derive(Debug, Error)]
pub enum PasteError {
    /// No metadata row, or (for a full read) no body.
    #[error("paste {0} not found")]
    NotFound(PasteId),

    /// Caller input failed validation.
    #[error("invalid input: {0}")]
    Validation(#[from] TypeError),

    /// The metadata row committed but the body write failed.
    #[error("paste {id} was recorded but its body could not be written: {source}")]
    PartialWrite {
        id: PasteId,
        #[source]
        source: StoreError,
    },

    /// The `edited_from` chain loops; the stored data is malformed.
    #[error("edited_from chain loops back to paste {0}")]
    CyclicLineage(PasteId),

    /// A body retry targeted a paste that already has one.
    #[error("paste {0} already has a body")]
    BodyExists(PasteId),

    /// A backing store failed.
    #[error("storage error: {0}")]
    StoreUnavailable(#[from] StoreError),
}

impl From<LineageError> for PasteError {
    fn from(err: LineageError) -> Self {
        match err {
            LineageError::NotFound(id) => PasteError::NotFound(id),
            LineageError::Cycle(id) => PasteError::CyclicLineage(id),
        }
    }
}

/// Create/read contract over a metadata store and a body store.
#[derive(Debug)]
pub struct PasteRepository<M, B> {
    metadata: M,
    blobs: B,
    time_format: TimeFormat,
}

impl<M: MetadataStore, B: BlobStore> PasteRepository<M, B> {
    /// Compose a repository from its two stores.
    pub fn new(metadata: M, blobs: B) -> Self {
        Self {
            metadata,
            blobs,
            time_format: TimeFormat::default(),
        }
    }

    /// Use `format` when decorating search results.
    pub fn with_time_format(mut self, format: TimeFormat) -> Self {
        self.time_format = format;
        self
    }

    pub fn time_format(&self) -> &TimeFormat {
        &self.time_format
    }

    pub fn metadata_store(&self) -> &M {
        &self.metadata
    }

    pub fn blob_store(&self) -> &B {
        &self.blobs
    }

    /// Create a paste and return its new id.
    ///
    /// # Errors
    ///
    /// - [`PasteError::StoreUnavailable`] if the metadata insert fails
    ///   (nothing was written)
    /// - [`PasteError::PartialWrite`] if the body write fails after the
    ///   metadata row committed
    pub fn create(&self, paste: &NewPaste) -> Result<PasteId, PasteError> {
        let id = self.metadata.insert(
            paste.title(),
            paste.author(),
            Timestamp::now(),
            paste.edited_from(),
        )?;
        debug!("allocated paste {id}");

        if let Err(source) = self.blobs.write(id, paste.body()) {
            warn!("paste {id}: metadata committed but body write failed: {source}");
            return Err(PasteError::PartialWrite { id, source });
        }

        Ok(id)
    }

    /// Write the body of a paste whose earlier body write failed.
    ///
    /// # Errors
    ///
    /// - [`PasteError::NotFound`] if no metadata row exists for `id`
    /// - [`PasteError::BodyExists`] if a body is already stored
    /// - [`PasteError::StoreUnavailable`] if either store fails
    pub fn restore_body(&self, id: PasteId, body: &str) -> Result<(), PasteError> {
        if self.metadata.select_by_id(id)?.is_none() {
            return Err(PasteError::NotFound(id));
        }
        match self.blobs.write(id, body) {
            Ok(()) => {
                debug!("restored body of paste {id}");
                Ok(())
            }
            Err(StoreError::AlreadyExists(_)) => Err(PasteError::BodyExists(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Read a paste with its body.
    ///
    /// # Errors
    ///
    /// [`PasteError::NotFound`] if the metadata row or the body is absent.
    pub fn read(&self, id: PasteId) -> Result<Paste, PasteError> {
        let metadata = self.read_metadata(id)?;
        match self.blobs.read(id)? {
            Some(body) => Ok(Paste { metadata, body }),
            None => {
                warn!("paste {id} has metadata but no body");
                Err(PasteError::NotFound(id))
            }
        }
    }

    /// Read a paste without its body.
    ///
    /// # Errors
    ///
    /// [`PasteError::NotFound`] if the metadata row is absent.
    pub fn read_metadata(&self, id: PasteId) -> Result<PasteMetadata, PasteError> {
        self.metadata
            .select_by_id(id)?
            .ok_or(PasteError::NotFound(id))
    }

    /// Every paste that exists, bodies omitted.
    ///
    /// Order is the metadata store's; sort explicitly if it matters.
    pub fn list_all_metadata(&self) -> Result<Vec<PasteMetadata>, PasteError> {
        Ok(self.metadata.select_all()?)
    }

    /// Resolve the family tree containing `id`.
    ///
    /// # Errors
    ///
    /// - [`PasteError::NotFound`] if `id` does not exist
    /// - [`PasteError::CyclicLineage`] if its ancestor chain loops
    pub fn family(&self, id: PasteId) -> Result<Family, PasteError> {
        let all = self.list_all_metadata()?;
        Ok(LineageIndex::new(&all).resolve_family(id)?)
    }

    /// Whether `id` has a parent or at least one child.
    pub fn is_family_member(&self, id: PasteId) -> Result<bool, PasteError> {
        let all = self.list_all_metadata()?;
        let index = LineageIndex::new(&all);
        let paste = index.get(id).ok_or(PasteError::NotFound(id))?;
        Ok(index.is_family_member(paste))
    }

    /// Run `query` over the current snapshot.
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, PasteError> {
        let all = self.list_all_metadata()?;
        let index = LineageIndex::new(&all);
        Ok(search(query, &all, &index, &self.time_format).collect())
    }

    /// Check the stores for missing bodies, dangling pointers, and cycles.
    pub fn verify(&self) -> Result<VerifyResult, PasteError> {
        let all = self.list_all_metadata()?;
        let index = LineageIndex::new(&all);
        Ok(verify::verify(&all, &index, &self.blobs)?)
    }
}
