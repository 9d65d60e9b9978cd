//! store::memory
//!
//! In-process stores for tests and embedders.
//!
//! Both stores keep their state behind a `Mutex`. They expose a few
//! knobs the durable stores cannot: seeding arbitrary metadata rows
//! (dangling or cyclic pointers included), dropping a body as if it had
//! been lost externally, and failing every body write.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::traits::{BlobStore, MetadataStore, StoreError};
use crate::core::types::{PasteId, PasteMetadata, Timestamp};

fn poisoned() -> StoreError {
    StoreError::Unavailable("store lock poisoned".into())
}

#[derive(Debug, Default)]
struct MetadataState {
    rows: Vec<PasteMetadata>,
    last_id: i64,
}

/// Metadata store held in memory.
#[derive(Debug, Default)]
pub struct MemoryMetadataStore {
    state: Mutex<MetadataState>,
}

impl MemoryMetadataStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding exactly `rows`, in the given order.
    ///
    /// Rows are taken as-is. Later inserts get ids above the largest
    /// seeded id.
    pub fn with_rows(rows: Vec<PasteMetadata>) -> Self {
        let last_id = rows.iter().map(|r| r.id.get()).max().unwrap_or(0);
        Self {
            state: Mutex::new(MetadataState { rows, last_id }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MetadataState>, StoreError> {
        self.state.lock().map_err(|_| poisoned())
    }
}

impl MetadataStore for MemoryMetadataStore {
    fn insert(
        &self,
        title: &str,
        author: &str,
        created_at: Timestamp,
        edited_from: Option<PasteId>,
    ) -> Result<PasteId, StoreError> {
        let mut state = self.lock()?;
        let id = PasteId::new(state.last_id + 1)
            .map_err(|e| StoreError::WriteError(format!("cannot allocate id: {e}")))?;
        state.last_id = id.get();
        state.rows.push(PasteMetadata {
            id,
            title: title.to_string(),
            author: author.to_string(),
            created_at,
            edited_from,
        });
        Ok(id)
    }

    fn select_by_id(&self, id: PasteId) -> Result<Option<PasteMetadata>, StoreError> {
        Ok(self.lock()?.rows.iter().find(|r| r.id == id).cloned())
    }

    fn select_all(&self) -> Result<Vec<PasteMetadata>, StoreError> {
        Ok(self.lock()?.rows.clone())
    }
}

/// Body store held in memory.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<PasteId, String>>,
    fail_writes: AtomicBool,
}

impl MemoryBlobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `write` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Drop the body of `id`, returning it if it existed.
    pub fn remove(&self, id: PasteId) -> Result<Option<String>, StoreError> {
        Ok(self.blobs.lock().map_err(|_| poisoned())?.remove(&id))
    }
}

impl BlobStore for MemoryBlobStore {
    fn write(&self, id: PasteId, content: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::WriteError(format!(
                "injected failure writing body of paste {id}"
            )));
        }
        match self.blobs.lock().map_err(|_| poisoned())?.entry(id) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(id)),
            Entry::Vacant(slot) => {
                slot.insert(content.to_string());
                Ok(())
            }
        }
    }

    fn read(&self, id: PasteId) -> Result<Option<String>, StoreError> {
        Ok(self.blobs.lock().map_err(|_| poisoned())?.get(&id).cloned())
    }
}
