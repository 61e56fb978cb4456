//! SQLite-backed collection store.

use crate::db::error::DbError;
use crate::db::schema::{SCHEMA, SCHEMA_VERSION};
use chrono::Utc;
use cloze_core::{Collection, CollectionStore};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

type Result<T> = std::result::Result<T, DbError>;

/// Collection overview for listings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CollectionSummary {
    pub id: i64,
    pub title: Option<String>,
    pub line_count: usize,
    pub updated_at: String,
}

/// SQLite implementation of [`CollectionStore`].
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;
        Ok(())
    }

    /// Get a collection or fail with [`DbError::CollectionNotFound`].
    pub fn require(&self, id: i64) -> Result<Collection> {
        self.get(id)?.ok_or(DbError::CollectionNotFound(id))
    }

    /// All collections with line counts, oldest first.
    pub fn summaries(&self) -> Result<Vec<CollectionSummary>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, raw_problems, updated_at FROM collections ORDER BY id")?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, title, raw, updated_at)| {
                let lines: Vec<String> = serde_json::from_str(&raw)?;
                Ok(CollectionSummary {
                    id,
                    title,
                    line_count: lines.len(),
                    updated_at,
                })
            })
            .collect()
    }

    fn row_to_parts(row: &rusqlite::Row) -> rusqlite::Result<(i64, Option<String>, String)> {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?))
    }

    fn decode((id, title, raw): (i64, Option<String>, String)) -> Result<Collection> {
        Ok(Collection {
            id: Some(id),
            title,
            raw_problems: serde_json::from_str(&raw)?,
        })
    }
}

impl CollectionStore for SqliteRepository {
    type Error = DbError;

    fn get(&self, id: i64) -> Result<Option<Collection>> {
        self.conn
            .query_row(
                "SELECT id, title, raw_problems FROM collections WHERE id = ?1",
                params![id],
                Self::row_to_parts,
            )
            .optional()?
            .map(Self::decode)
            .transpose()
    }

    fn set(&mut self, collection: &Collection) -> Result<i64> {
        let raw = serde_json::to_string(&collection.raw_problems)?;
        let now = Utc::now().to_rfc3339();

        let id = match collection.id {
            Some(id) => {
                self.conn.execute(
                    "INSERT OR REPLACE INTO collections (id, title, raw_problems, updated_at) VALUES (?1, ?2, ?3, ?4)",
                    params![id, collection.title, raw, now],
                )?;
                id
            }
            None => {
                self.conn.execute(
                    "INSERT INTO collections (title, raw_problems, updated_at) VALUES (?1, ?2, ?3)",
                    params![collection.title, raw, now],
                )?;
                self.conn.last_insert_rowid()
            }
        };

        tracing::debug!(id, lines = collection.raw_problems.len(), "stored collection");
        Ok(id)
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM collections WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<Collection>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, raw_problems FROM collections ORDER BY id")?;

        let rows = stmt
            .query_map([], Self::row_to_parts)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter().map(Self::decode).collect()
    }

    fn clear(&mut self) -> Result<()> {
        self.conn.execute("DELETE FROM collections", [])?;
        Ok(())
    }
}
