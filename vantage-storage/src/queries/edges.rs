//! graph_edges table queries.

use rusqlite::{params, Connection};
use vantage_core::errors::StorageError;
use vantage_core::types::AttackEdge;

/// Insert a batch of edges tagged with the organization id.
pub fn insert_edges(
    conn: &Connection,
    organization_id: &str,
    edges: &[AttackEdge],
) -> Result<usize, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO graph_edges
             (organization_id, source_id, target_id, kind, weight, properties)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    let mut count = 0;
    for edge in edges {
        let properties =
            serde_json::to_string(&edge.properties).map_err(|e| StorageError::Serialization {
                message: e.to_string(),
            })?;
        stmt.execute(params![
            organization_id,
            edge.source_id,
            edge.target_id,
            edge.kind.name(),
            edge.weight,
            properties,
        ])
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
        count += 1;
    }
    Ok(count)
}

/// Delete every edge tagged with the organization id.
pub fn delete_organization_edges(
    conn: &Connection,
    organization_id: &str,
) -> Result<usize, StorageError> {
    conn.execute(
        "DELETE FROM graph_edges WHERE organization_id = ?1",
        params![organization_id],
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })
}

/// Count edges for one organization.
pub fn count_edges(conn: &Connection, organization_id: &str) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM graph_edges WHERE organization_id = ?1",
        params![organization_id],
        |row| row.get(0),
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })
}
