//! store::sqlite
//!
//! SQLite-backed metadata store.
//!
//! # Connections
//!
//! The store handle holds only the database path. Every operation opens
//! its own connection and drops it before returning, so a handle can be
//! shared across threads and no connection outlives the call that
//! needed it.
//!
//! # Id allocation
//!
//! `id` is `INTEGER PRIMARY KEY AUTOINCREMENT`: SQLite hands out
//! strictly increasing ids and never reuses one, even after rows are
//! deleted by something outside this crate. The insert runs inside an
//! `IMMEDIATE` transaction and reads `last_insert_rowid()` on the same
//! connection before committing.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};

use super::traits::{MetadataStore, StoreError};
use crate::core::types::{PasteId, PasteMetadata, Timestamp};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS pastes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    inserted_at INTEGER NOT NULL,
    edited_from INTEGER NULL
);
CREATE INDEX IF NOT EXISTS pastes_edited_from ON pastes(edited_from);
";

const SELECT_COLUMNS: &str = "SELECT id, title, author, inserted_at, edited_from FROM pastes";

/// Metadata store backed by a SQLite database file.
#[derive(Debug, Clone)]
pub struct SqliteMetadataStore {
    path: PathBuf,
}

impl SqliteMetadataStore {
    /// Open (creating if needed) the database at `path` and install the schema.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the database cannot be opened,
    /// or `StoreError::Sql` if the schema cannot be installed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Unavailable(format!("cannot create {}: {e}", parent.display()))
            })?;
        }

        let store = Self { path };
        store.connect()?.execute_batch(SCHEMA)?;
        debug!("opened metadata store at {}", store.path.display());
        Ok(store)
    }

    /// Path to the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.path).map_err(|e| {
            StoreError::Unavailable(format!("cannot open {}: {e}", self.path.display()))
        })?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }
}

/// Column values before validation.
struct RawRow {
    id: i64,
    title: String,
    author: String,
    inserted_at: i64,
    edited_from: Option<i64>,
}

impl RawRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            author: row.get(2)?,
            inserted_at: row.get(3)?,
            edited_from: row.get(4)?,
        })
    }

    fn into_metadata(self) -> Result<PasteMetadata, StoreError> {
        let id = PasteId::new(self.id)
            .map_err(|e| StoreError::Corrupt(format!("row id {}: {e}", self.id)))?;
        let edited_from = self
            .edited_from
            .map(PasteId::new)
            .transpose()
            .map_err(|e| StoreError::Corrupt(format!("edited_from of paste {id}: {e}")))?;
        Ok(PasteMetadata {
            id,
            title: self.title,
            author: self.author,
            created_at: Timestamp::from_secs(self.inserted_at),
            edited_from,
        })
    }
}

impl MetadataStore for SqliteMetadataStore {
    fn insert(
        &self,
        title: &str,
        author: &str,
        created_at: Timestamp,
        edited_from: Option<PasteId>,
    ) -> Result<PasteId, StoreError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO pastes(title, author, inserted_at, edited_from) VALUES (?1, ?2, ?3, ?4)",
            params![
                title,
                author,
                created_at.as_secs(),
                edited_from.map(PasteId::get)
            ],
        )?;
        let raw = tx.last_insert_rowid();
        tx.commit()?;

        PasteId::new(raw).map_err(|e| StoreError::Corrupt(format!("allocated id {raw}: {e}")))
    }

    fn select_by_id(&self, id: PasteId) -> Result<Option<PasteMetadata>, StoreError> {
        let conn = self.connect()?;
        let raw = conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id.get()],
                RawRow::from_row,
            )
            .optional()?;
        raw.map(RawRow::into_metadata).transpose()
    }

    fn select_all(&self) -> Result<Vec<PasteMetadata>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
        let rows = stmt.query_map([], RawRow::from_row)?;

        let mut result = Vec::new();
        for raw in rows {
            result.push(raw?.into_metadata()?);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, SqliteMetadataStore) {
        let temp = TempDir::new().expect("create temp dir");
        let store = SqliteMetadataStore::open(temp.path().join("pastes.db")).expect("open");
        (temp, store)
    }

    fn id(raw: i64) -> PasteId {
        PasteId::new(raw).unwrap()
    }

    #[test]
    fn insert_allocates_increasing_ids() {
        let (_temp, store) = create_test_store();
        let t = Timestamp::from_secs(100);

        let a = store.insert("a", "x", t, None).expect("insert a");
        let b = store.insert("b", "x", t, Some(a)).expect("insert b");

        assert_eq!(a, id(1));
        assert!(b > a);
    }

    #[test]
    fn select_by_id_roundtrip() {
        let (_temp, store) = create_test_store();
        let parent = store
            .insert("p", "ann", Timestamp::from_secs(5), None)
            .expect("insert");
        let child = store
            .insert("c", "bob", Timestamp::from_secs(6), Some(parent))
            .expect("insert");

        let row = store.select_by_id(child).expect("select").expect("present");
        assert_eq!(row.id, child);
        assert_eq!(row.title, "c");
        assert_eq!(row.author, "bob");
        assert_eq!(row.created_at, Timestamp::from_secs(6));
        assert_eq!(row.edited_from, Some(parent));
    }

    #[test]
    fn select_missing_is_none() {
        let (_temp, store) = create_test_store();
        assert!(store.select_by_id(id(42)).expect("select").is_none());
    }

    #[test]
    fn select_all_in_id_order() {
        let (_temp, store) = create_test_store();
        for title in ["one", "two", "three"] {
            store
                .insert(title, "a", Timestamp::from_secs(0), None)
                .expect("insert");
        }
        let titles: Vec<_> = store
            .select_all()
            .expect("select all")
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, vec!["one", "two", "three"]);
    }

    #[test]
    fn ids_not_reused_after_external_delete() {
        let (_temp, store) = create_test_store();
        let t = Timestamp::from_secs(0);
        store.insert("a", "x", t, None).expect("insert");
        let second = store.insert("b", "x", t, None).expect("insert");

        let conn = Connection::open(store.path()).expect("open raw");
        conn.execute("DELETE FROM pastes WHERE id = ?1", params![second.get()])
            .expect("delete");

        let third = store.insert("c", "x", t, None).expect("insert");
        assert!(third > second);
    }

    #[test]
    fn reopen_keeps_rows() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("nested").join("pastes.db");

        let first = {
            let store = SqliteMetadataStore::open(&path).expect("open");
            store
                .insert("kept", "x", Timestamp::from_secs(0), None)
                .expect("insert")
        };

        let store = SqliteMetadataStore::open(&path).expect("reopen");
        let row = store.select_by_id(first).expect("select").expect("present");
        assert_eq!(row.title, "kept");
    }

    #[test]
    fn corrupt_row_is_reported() {
        let (_temp, store) = create_test_store();
        let conn = Connection::open(store.path()).expect("open raw");
        conn.execute(
            "INSERT INTO pastes(title, author, inserted_at, edited_from) VALUES ('t', 'a', 0, -5)",
            [],
        )
        .expect("raw insert");

        let err = store.select_all().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)), "{err:?}");
    }

    #[test]
    fn unopenable_path_is_unavailable() {
        let temp = TempDir::new().expect("create temp dir");
        // A directory cannot be opened as a database file.
        let err = SqliteMetadataStore::open(temp.path()).unwrap_err();
        assert!(
            matches!(err, StoreError::Unavailable(_) | StoreError::Sql(_)),
            "{err:?}"
        );
    }
}
