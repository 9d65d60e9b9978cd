//! core::lineage
//!
//! Edit lineage ("family") reconstruction from flat parent pointers.
//!
//! # Architecture
//!
//! Lineage is a forest where:
//! - Nodes are pastes from one metadata snapshot
//! - Edges point from a derived paste to the paste it was edited from
//!   (stored as `edited_from` on the metadata row)
//! - A root is a paste with no `edited_from`, or whose `edited_from`
//!   names an id missing from the snapshot (dangling pointer)
//!
//! # Invariants
//!
//! - The children index is built once per snapshot, never per node
//! - Every upward walk is bounded by a visited set; a revisit is a
//!   [`LineageError::Cycle`], never an endless loop
//! - No traversal recurses over paste depth
//! - Children keep snapshot order among siblings

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use log::debug;
use serde::Serialize;
use thiserror::Error;

use super::types::{PasteId, PasteMetadata};

/// Errors from lineage resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineageError {
    /// The requested id is not in the snapshot.
    #[error("paste {0} not found")]
    NotFound(PasteId),

    /// Following `edited_from` pointers revisited this id.
    #[error("edited_from chain loops back to paste {0}")]
    Cycle(PasteId),
}

/// A paste and every paste derived from it, transitively.
///
/// Produced on demand by [`LineageIndex::resolve_family`]; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Family {
    pub paste: PasteMetadata,
    pub children: Vec<Family>,
}

impl Family {
    /// Total number of pastes in the tree, this node included.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// A family always holds at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether a paste with `id` appears anywhere in the tree.
    pub fn contains(&self, id: PasteId) -> bool {
        self.iter().any(|(_, node)| node.paste.id == id)
    }

    /// Pre-order traversal yielding `(depth, node)`, root at depth 0.
    ///
    /// # Example
    ///
    /// ```
    /// use pasteline::core::lineage::resolve_family;
    /// use pasteline::core::types::{PasteId, PasteMetadata, Timestamp};
    ///
    /// let meta = |id: i64, parent: Option<i64>| PasteMetadata {
    ///     id: PasteId::new(id).unwrap(),
    ///     title: format!("t{id}"),
    ///     author: "a".into(),
    ///     created_at: Timestamp::from_secs(0),
    ///     edited_from: parent.map(|p| PasteId::new(p).unwrap()),
    /// };
    /// let all = vec![meta(1, None), meta(2, Some(1)), meta(3, Some(2))];
    ///
    /// let family = resolve_family(&all, PasteId::new(3).unwrap()).unwrap();
    /// let depths: Vec<_> = family.iter().map(|(d, f)| (d, f.paste.id.get())).collect();
    /// assert_eq!(depths, vec![(0, 1), (1, 2), (2, 3)]);
    /// ```
    pub fn iter(&self) -> FamilyIter<'_> {
        FamilyIter {
            stack: vec![(0, self)],
        }
    }
}

impl Drop for Family {
    // Flatten before dropping so long chains do not recurse.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Pre-order iterator over a [`Family`], driven by an explicit stack.
#[derive(Debug)]
pub struct FamilyIter<'a> {
    stack: Vec<(usize, &'a Family)>,
}

impl<'a> Iterator for FamilyIter<'a> {
    type Item = (usize, &'a Family);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

/// Lookup tables over one metadata snapshot.
///
/// Built in O(n). All queries borrow the snapshot, so it cannot change
/// underneath an index.
#[derive(Debug)]
pub struct LineageIndex<'a> {
    /// Snapshot rows by id
    pastes: HashMap<PasteId, &'a PasteMetadata>,
    /// Reverse of `edited_from`: parent id to child ids, in snapshot order
    children: HashMap<PasteId, Vec<PasteId>>,
}

impl<'a> LineageIndex<'a> {
    /// Index a metadata snapshot.
    ///
    /// If an id appears more than once, the first row wins.
    pub fn new(all: &'a [PasteMetadata]) -> Self {
        let mut pastes = HashMap::with_capacity(all.len());
        let mut children: HashMap<PasteId, Vec<PasteId>> = HashMap::new();

        for paste in all {
            if let Entry::Vacant(slot) = pastes.entry(paste.id) {
                slot.insert(paste);
                if let Some(parent) = paste.edited_from {
                    children.entry(parent).or_default().push(paste.id);
                }
            }
        }

        Self { pastes, children }
    }

    /// Number of distinct pastes in the snapshot.
    pub fn len(&self) -> usize {
        self.pastes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pastes.is_empty()
    }

    /// Look up a paste by id.
    pub fn get(&self, id: PasteId) -> Option<&'a PasteMetadata> {
        self.pastes.get(&id).copied()
    }

    /// Ids of pastes edited directly from `id`, in snapshot order.
    pub fn children(&self, id: PasteId) -> &[PasteId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `paste` belongs to a family of more than one paste.
    ///
    /// True if it was edited from something (even a paste that no longer
    /// exists) or if anything was edited from it.
    pub fn is_family_member(&self, paste: &PasteMetadata) -> bool {
        paste.edited_from.is_some() || !self.children(paste.id).is_empty()
    }

    /// Whether `edited_from` names an id outside the snapshot.
    pub fn is_dangling(&self, paste: &PasteMetadata) -> bool {
        paste
            .edited_from
            .is_some_and(|parent| !self.pastes.contains_key(&parent))
    }

    /// Ancestors of `id`, from immediate parent up to the effective root.
    ///
    /// A dangling pointer ends the chain without error.
    ///
    /// # Errors
    ///
    /// - [`LineageError::NotFound`] if `id` is not in the snapshot
    /// - [`LineageError::Cycle`] if the chain revisits a paste
    pub fn ancestors(&self, id: PasteId) -> Result<Vec<PasteId>, LineageError> {
        let mut current = self.get(id).ok_or(LineageError::NotFound(id))?;
        let mut visited = HashSet::from([current.id]);
        let mut result = Vec::new();

        while let Some(parent_id) = current.edited_from {
            let Some(parent) = self.get(parent_id) else {
                debug!(
                    "paste {} points at missing paste {}; treating it as root",
                    current.id, parent_id
                );
                break;
            };
            if !visited.insert(parent_id) {
                return Err(LineageError::Cycle(parent_id));
            }
            result.push(parent_id);
            current = parent;
        }

        Ok(result)
    }

    /// The effective root (oldest reachable ancestor) of `id`.
    ///
    /// # Errors
    ///
    /// Same as [`LineageIndex::ancestors`].
    pub fn find_root(&self, id: PasteId) -> Result<PasteId, LineageError> {
        Ok(self.ancestors(id)?.last().copied().unwrap_or(id))
    }

    /// Build the family tree containing `id`, rooted at its effective root.
    ///
    /// # Errors
    ///
    /// Same as [`LineageIndex::ancestors`].
    pub fn resolve_family(&self, id: PasteId) -> Result<Family, LineageError> {
        let root = self.find_root(id)?;

        // Pre-order listing of the subtree, then assemble bottom-up so
        // every child is finished before its parent takes it.
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                return Err(LineageError::Cycle(current));
            }
            order.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }

        let mut built: HashMap<PasteId, Family> = HashMap::with_capacity(order.len());
        for &node in order.iter().rev() {
            let paste = self.get(node).ok_or(LineageError::NotFound(node))?;
            let children = self
                .children(node)
                .iter()
                .filter_map(|child| built.remove(child))
                .collect();
            built.insert(
                node,
                Family {
                    paste: paste.clone(),
                    children,
                },
            );
        }

        debug!("resolved family of paste {id}: root {root}, {} member(s)", order.len());
        built.remove(&root).ok_or(LineageError::NotFound(root))
    }

    /// Ids whose ancestor chain loops, sorted ascending.
    ///
    /// Includes pastes that only lead into a loop. Each paste is walked
    /// once; verdicts are shared along the path.
    pub fn cyclic_ids(&self) -> Vec<PasteId> {
        let mut verdict: HashMap<PasteId, bool> = HashMap::with_capacity(self.pastes.len());

        for &start in self.pastes.keys() {
            let mut path = Vec::new();
            let mut on_path = HashSet::new();
            let mut current = Some(start);

            let looped = loop {
                let Some(id) = current.filter(|id| self.pastes.contains_key(id)) else {
                    break false;
                };
                if let Some(&known) = verdict.get(&id) {
                    break known;
                }
                if !on_path.insert(id) {
                    break true;
                }
                path.push(id);
                current = self.pastes[&id].edited_from;
            };

            for id in path {
                verdict.insert(id, looped);
            }
        }

        let mut ids: Vec<PasteId> = verdict
            .into_iter()
            .filter_map(|(id, looped)| looped.then_some(id))
            .collect();
        ids.sort();
        ids
    }
}

/// Resolve the family of `id` within `all`.
///
/// Convenience wrapper that indexes the snapshot and resolves once.
/// Callers resolving many ids should build a [`LineageIndex`] instead.
pub fn resolve_family(all: &[PasteMetadata], id: PasteId) -> Result<Family, LineageError> {
    LineageIndex::new(all).resolve_family(id)
}
