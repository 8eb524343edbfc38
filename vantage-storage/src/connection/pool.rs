//! Round-robin pool of read-only connections.
//!
//! Reads (deep path queries, counts) never contend with the serialized
//! writer; WAL mode lets them proceed during a replace.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};
use vantage_core::errors::StorageError;

use super::pragmas::apply_read_pragmas;

const MAX_POOL_SIZE: usize = 8;

pub struct ReadPool {
    connections: Vec<Mutex<Connection>>,
    cursor: AtomicUsize,
}

impl ReadPool {
    /// Default number of pooled readers.
    pub fn default_size() -> usize {
        4
    }

    /// Open `pool_size` read-only connections to the database at `path`.
    /// The size is clamped to `1..=8`.
    pub fn open(path: &Path, pool_size: usize) -> Result<Self, StorageError> {
        let size = pool_size.clamp(1, MAX_POOL_SIZE);
        let connections = (0..size)
            .map(|_| {
                let conn = Connection::open_with_flags(
                    path,
                    OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
                )
                .map_err(|e| StorageError::SqliteError {
                    message: format!("open read connection: {e}"),
                })?;
                apply_read_pragmas(&conn)?;
                Ok(Mutex::new(conn))
            })
            .collect::<Result<Vec<_>, StorageError>>()?;

        Ok(Self {
            connections,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Pool of private in-memory connections (testing only; they share no
    /// data with any writer).
    pub fn open_in_memory(pool_size: usize) -> Result<Self, StorageError> {
        let size = pool_size.clamp(1, MAX_POOL_SIZE);
        let connections = (0..size)
            .map(|_| {
                Connection::open_in_memory()
                    .map(Mutex::new)
                    .map_err(|e| StorageError::SqliteError {
                        message: format!("open in-memory read connection: {e}"),
                    })
            })
            .collect::<Result<Vec<_>, StorageError>>()?;

        Ok(Self {
            connections,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Run `f` on the next reader in round-robin order.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.connections.len();
        let conn = self.connections[idx]
            .lock()
            .map_err(|_| StorageError::SqliteError {
                message: "read pool lock poisoned".to_string(),
            })?;
        f(&conn)
    }
}
