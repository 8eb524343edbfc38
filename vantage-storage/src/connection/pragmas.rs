//! SQLite pragma configuration.

use rusqlite::Connection;
use vantage_core::errors::StorageError;

/// Pragmas for the write connection: WAL for concurrent reads during
/// writes, normal fsync, generous page cache.
pub fn apply_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA cache_size = -64000;
         PRAGMA temp_store = MEMORY;
         PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = 5000;",
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })
}

/// Pragmas for read-only pool connections.
pub fn apply_read_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "PRAGMA query_only = ON;
         PRAGMA cache_size = -16000;
         PRAGMA busy_timeout = 5000;",
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })
}
