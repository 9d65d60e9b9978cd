//! core::verify
//!
//! Read-only consistency checks over a metadata snapshot and its bodies.
//!
//! # Checks
//!
//! - Every metadata row has a body (a failed body write leaves a row
//!   without one; that gap is reported, never hidden)
//! - Every `edited_from` names a paste in the snapshot
//! - No ancestor chain loops
//!
//! Dangling pointers are reported for information only. Lineage
//! resolution tolerates them.
//!
//! # Invariants
//!
//! - Never mutates either store
//! - Findings are deterministic: sorted by paste id

use thiserror::Error;

use super::lineage::LineageIndex;
use super::types::{PasteId, PasteMetadata};
use crate::store::{BlobStore, StoreError};

/// A problem found during verification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("paste {0} has metadata but no body")]
    MissingBody(PasteId),

    #[error("paste {id} was edited from missing paste {parent}")]
    DanglingParent { id: PasteId, parent: PasteId },

    #[error("edited_from chain of paste {0} loops")]
    CycleDetected(PasteId),
}

impl VerifyError {
    /// Whether the finding indicates damaged data rather than a
    /// tolerated condition.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, VerifyError::DanglingParent { .. })
    }

    fn paste_id(&self) -> PasteId {
        match self {
            VerifyError::MissingBody(id) | VerifyError::CycleDetected(id) => *id,
            VerifyError::DanglingParent { id, .. } => *id,
        }
    }
}

/// Result of verification.
#[derive(Debug)]
pub struct VerifyResult {
    /// Whether no fatal problem was found
    pub ok: bool,
    /// Pastes checked
    pub checked: usize,
    /// Every finding, fatal or not
    pub errors: Vec<VerifyError>,
}

impl VerifyResult {
    /// Create a successful result.
    pub fn success(checked: usize) -> Self {
        Self {
            ok: true,
            checked,
            errors: vec![],
        }
    }

    /// Create a result from findings; `ok` unless one is fatal.
    pub fn from_findings(checked: usize, errors: Vec<VerifyError>) -> Self {
        Self {
            ok: !errors.iter().any(VerifyError::is_fatal),
            checked,
            errors,
        }
    }
}

/// Check a snapshot against its body store.
///
/// `index` must be built from `all`.
///
/// # Errors
///
/// Returns a `StoreError` only if the body store itself fails.
pub fn verify(
    all: &[PasteMetadata],
    index: &LineageIndex<'_>,
    blobs: &dyn BlobStore,
) -> Result<VerifyResult, StoreError> {
    let mut errors = Vec::new();

    for paste in all {
        if !blobs.exists(paste.id)? {
            errors.push(VerifyError::MissingBody(paste.id));
        }
        if index.is_dangling(paste) {
            if let Some(parent) = paste.edited_from {
                errors.push(VerifyError::DanglingParent {
                    id: paste.id,
                    parent,
                });
            }
        }
    }

    errors.extend(index.cyclic_ids().into_iter().map(VerifyError::CycleDetected));
    errors.sort_by_key(VerifyError::paste_id);

    if errors.is_empty() {
        Ok(VerifyResult::success(all.len()))
    } else {
        Ok(VerifyResult::from_findings(all.len(), errors))
    }
}
