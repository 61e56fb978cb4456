//! Database error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("collection not found: {0}")]
    CollectionNotFound(i64),

    #[error("invalid stored lines: {0}")]
    InvalidData(#[from] serde_json::Error),
}
