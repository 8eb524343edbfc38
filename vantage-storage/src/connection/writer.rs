//! Transaction helper for the write connection.

use rusqlite::Connection;
use vantage_core::errors::StorageError;

/// Run `f` inside a BEGIN IMMEDIATE transaction.
///
/// IMMEDIATE takes the write lock up front, so a concurrent reader can never
/// upgrade-deadlock a half-finished replace, and the whole
/// delete-then-insert is atomic: either the new organization snapshot lands
/// or the old one stays.
pub fn with_immediate_transaction<F, T>(conn: &Connection, f: F) -> Result<T, StorageError>
where
    F: FnOnce(&rusqlite::Transaction<'_>) -> Result<T, StorageError>,
{
    conn.execute_batch("BEGIN IMMEDIATE")
        .map_err(|e| StorageError::SqliteError {
            message: format!("begin immediate: {e}"),
        })?;

    // Wrap the already-open transaction so it rolls back on drop; no second
    // BEGIN is issued.
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| StorageError::SqliteError {
            message: format!("wrap transaction: {e}"),
        })?;

    let result = f(&tx)?;

    tx.commit().map_err(|e| StorageError::SqliteError {
        message: format!("commit replace: {e}"),
    })?;

    Ok(result)
}
