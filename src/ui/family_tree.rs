//! ui::family_tree
//!
//! Pure rendering of a [`Family`] as indented text.
//!
//! # Example Output
//!
//! ```text
//!   #1 notes by ada (01/02/24 10:00:00)
//!     #2 notes by bob (01/02/24 11:00:00)
//! *     #3 notes, fixed by cy (01/03/24 09:30:00)
//!     #4 notes by dee (01/04/24 08:00:00)
//! ```
//!
//! The `*` marks the paste the tree was requested for.

use crate::core::lineage::Family;
use crate::core::types::{PasteId, TimeFormat};

/// Render `family` one paste per line, children indented under parents.
///
/// `current` is marked with `*` in the first column.
pub fn render(family: &Family, current: Option<PasteId>, format: &TimeFormat) -> String {
    family
        .iter()
        .map(|(depth, node)| {
            let paste = &node.paste;
            let marker = if Some(paste.id) == current { '*' } else { ' ' };
            format!(
                "{marker} {indent}#{id} {title} by {author} ({time})",
                indent = "  ".repeat(depth),
                id = paste.id,
                title = paste.title,
                author = paste.author,
                time = paste.created_at.format(format),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
