//! core::search
//!
//! Exact-match search over a metadata snapshot.
//!
//! # Semantics
//!
//! - Filters are trimmed; a blank filter is no filter
//! - No filters at all matches every paste
//! - Otherwise a paste matches if its title equals the title filter OR
//!   its author equals the author filter (exact, case-sensitive)
//! - Results come out lazily, in snapshot order, each exactly once
//!
//! # Example
//!
//! ```
//! use pasteline::core::lineage::LineageIndex;
//! use pasteline::core::search::{search, SearchQuery};
//! use pasteline::core::types::{PasteId, PasteMetadata, TimeFormat, Timestamp};
//!
//! let all = vec![PasteMetadata {
//!     id: PasteId::new(1).unwrap(),
//!     title: "notes".into(),
//!     author: "ada".into(),
//!     created_at: Timestamp::from_secs(0),
//!     edited_from: None,
//! }];
//! let index = LineageIndex::new(&all);
//! let query = SearchQuery::new(None, Some("ada"));
//! let format = TimeFormat::default();
//!
//! let hits: Vec<_> = search(&query, &all, &index, &format).collect();
//! assert_eq!(hits.len(), 1);
//! assert!(!hits[0].family_member);
//! ```

use serde::Serialize;

use super::lineage::LineageIndex;
use super::types::{PasteMetadata, TimeFormat};

/// Title and author filters for a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    title: Option<String>,
    author: Option<String>,
}

impl SearchQuery {
    /// Build a query, trimming both filters and dropping blank ones.
    pub fn new(title: Option<&str>, author: Option<&str>) -> Self {
        fn normalize(filter: Option<&str>) -> Option<String> {
            filter
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
        }
        Self {
            title: normalize(title),
            author: normalize(author),
        }
    }

    /// A query that matches everything.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// True when neither filter is set.
    pub fn is_unfiltered(&self) -> bool {
        self.title.is_none() && self.author.is_none()
    }

    /// Whether `paste` satisfies this query.
    pub fn matches(&self, paste: &PasteMetadata) -> bool {
        if self.is_unfiltered() {
            return true;
        }
        let title_match = self.title.as_deref() == Some(paste.title.as_str());
        let author_match = self.author.as_deref() == Some(paste.author.as_str());
        title_match || author_match
    }
}

/// A search hit with display decorations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub paste: PasteMetadata,
    /// `created_at` rendered with the configured time format
    pub created: String,
    /// Whether the paste has a parent or at least one child
    pub family_member: bool,
}

/// Lazy iterator over decorated matches. See [`search`].
#[derive(Debug)]
pub struct Matches<'a> {
    query: &'a SearchQuery,
    pastes: std::slice::Iter<'a, PasteMetadata>,
    index: &'a LineageIndex<'a>,
    format: &'a TimeFormat,
}

impl Iterator for Matches<'_> {
    type Item = SearchResult;

    fn next(&mut self) -> Option<Self::Item> {
        let query = self.query;
        let paste = self.pastes.by_ref().find(|p| query.matches(p))?;
        Some(SearchResult {
            paste: paste.clone(),
            created: paste.created_at.format(self.format),
            family_member: self.index.is_family_member(paste),
        })
    }
}

/// Search `all` with `query`, decorating each hit.
///
/// `index` must have been built from the same `all` snapshot; it supplies
/// the family flag without rescanning the snapshot per hit.
pub fn search<'a>(
    query: &'a SearchQuery,
    all: &'a [PasteMetadata],
    index: &'a LineageIndex<'a>,
    format: &'a TimeFormat,
) -> Matches<'a> {
    Matches {
        query,
        pastes: all.iter(),
        index,
        format,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PasteId, Timestamp};

    fn meta(raw: i64, title: &str, author: &str, parent: Option<i64>) -> PasteMetadata {
        PasteMetadata {
            id: PasteId::new(raw).unwrap(),
            title: title.into(),
            author: author.into(),
            created_at: Timestamp::from_secs(1_700_000_000),
            edited_from: parent.map(|p| PasteId::new(p).unwrap()),
        }
    }

    fn sample() -> Vec<PasteMetadata> {
        vec![
            meta(1, "A", "ann", None),
            meta(2, "B", "bob", Some(1)),
            meta(3, "C", "bob", Some(2)),
            meta(4, "Bee", "cat", None),
            meta(5, "B", "dan", None),
        ]
    }

    fn run(all: &[PasteMetadata], title: Option<&str>, author: Option<&str>) -> Vec<i64> {
        let index = LineageIndex::new(all);
        let query = SearchQuery::new(title, author);
        let format = TimeFormat::default();
        search(&query, all, &index, &format)
            .map(|r| r.paste.id.get())
            .collect()
    }

    #[test]
    fn no_filters_returns_everything_in_order() {
        let all = sample();
        assert_eq!(run(&all, None, None), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn blank_filters_count_as_none() {
        let all = sample();
        assert_eq!(run(&all, Some("  "), Some("")), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn title_match_is_exact() {
        let all = sample();
        assert_eq!(run(&all, Some("B"), None), vec![2, 5]);
        assert_eq!(run(&all, Some("b"), None), Vec::<i64>::new());
    }

    #[test]
    fn title_filter_is_trimmed() {
        let all = sample();
        assert_eq!(run(&all, Some(" B "), Some("")), vec![2, 5]);
    }

    #[test]
    fn author_match() {
        let all = sample();
        assert_eq!(run(&all, None, Some("bob")), vec![2, 3]);
    }

    #[test]
    fn title_or_author() {
        let all = sample();
        assert_eq!(run(&all, Some("Bee"), Some("ann")), vec![1, 4]);
    }

    #[test]
    fn both_filters_matching_same_paste_yield_it_once() {
        let all = sample();
        assert_eq!(run(&all, Some("B"), Some("bob")), vec![2, 3, 5]);
    }

    #[test]
    fn results_carry_family_flag_and_time() {
        let all = sample();
        let index = LineageIndex::new(&all);
        let query = SearchQuery::all();
        let format = TimeFormat::new("%Y").unwrap();

        let hits: Vec<_> = search(&query, &all, &index, &format).collect();

        let flags: Vec<_> = hits.iter().map(|h| h.family_member).collect();
        assert_eq!(flags, vec![true, true, true, false, false]);
        assert_eq!(hits[0].created, "2023");
    }

    #[test]
    fn iterator_is_lazy() {
        let all = sample();
        let index = LineageIndex::new(&all);
        let query = SearchQuery::all();
        let format = TimeFormat::default();

        let mut matches = search(&query, &all, &index, &format);
        assert_eq!(matches.next().map(|r| r.paste.id.get()), Some(1));
        assert_eq!(matches.count(), 4);
    }

    #[test]
    fn query_accessors() {
        let q = SearchQuery::new(Some(" x "), None);
        assert_eq!(q.title(), Some("x"));
        assert_eq!(q.author(), None);
        assert!(!q.is_unfiltered());
        assert!(SearchQuery::all().is_unfiltered());
    }
}
