//! graph_nodes table queries.

use rusqlite::{params, Connection};
use vantage_core::errors::StorageError;
use vantage_core::types::AttackNode;

/// Insert a batch of nodes tagged with the organization id.
pub fn insert_nodes(
    conn: &Connection,
    organization_id: &str,
    nodes: &[AttackNode],
) -> Result<usize, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT OR REPLACE INTO graph_nodes
             (id, organization_id, kind, name, account_id, region,
              risk_score, criticality, is_public, properties)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    let mut count = 0;
    for node in nodes {
        let properties =
            serde_json::to_string(&node.properties).map_err(|e| StorageError::Serialization {
                message: e.to_string(),
            })?;
        stmt.execute(params![
            node.id,
            organization_id,
            node.kind.name(),
            node.name,
            node.account_id,
            node.region,
            node.risk_score,
            node.criticality.name(),
            node.is_publicly_exposed() as i64,
            properties,
        ])
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
        count += 1;
    }
    Ok(count)
}

/// Delete every node tagged with the organization id.
pub fn delete_organization_nodes(
    conn: &Connection,
    organization_id: &str,
) -> Result<usize, StorageError> {
    conn.execute(
        "DELETE FROM graph_nodes WHERE organization_id = ?1",
        params![organization_id],
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })
}

/// Count nodes for one organization.
pub fn count_nodes(conn: &Connection, organization_id: &str) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM graph_nodes WHERE organization_id = ?1",
        params![organization_id],
        |row| row.get(0),
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })
}
