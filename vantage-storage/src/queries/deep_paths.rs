//! Recursive-CTE deep path search over the mirrored graph.
//!
//! Finds the shortest bounded path from every publicly exposed node to every
//! critical node, ranked by summed node risk. Runs against the durable store
//! so it works across sessions, without rebuilding the in-memory graph.

use rusqlite::{params, Connection};
use vantage_core::errors::StorageError;

/// One exposed-to-critical path from the deep search.
#[derive(Debug, Clone)]
pub struct DeepPathRow {
    pub source_id: String,
    pub target_id: String,
    /// Node ids along the path, source first.
    pub node_path: Vec<String>,
    /// Summed risk of every node on the path.
    pub total_risk: f64,
    /// Edge count.
    pub depth: u32,
}

/// Walk forward from every public node up to `hop_limit` edges, keep the
/// shortest simple path per (source, target) pair ending on a critical node,
/// and rank by total risk.
pub fn deep_attack_paths(
    conn: &Connection,
    organization_id: &str,
    hop_limit: u32,
    limit: usize,
) -> Result<Vec<DeepPathRow>, StorageError> {
    // The visited set is encoded in the path string; instr() keeps the walk
    // simple (no repeated node).
    let sql = "
        WITH RECURSIVE walk(source_id, node_id, depth, path, total_risk) AS (
            SELECT n.id, n.id, 0, ',' || n.id || ',', n.risk_score
            FROM graph_nodes n
            WHERE n.organization_id = ?1 AND n.is_public = 1
            UNION ALL
            SELECT w.source_id, e.target_id, w.depth + 1,
                   w.path || e.target_id || ',',
                   w.total_risk + t.risk_score
            FROM walk w
            JOIN graph_edges e
              ON e.organization_id = ?1 AND e.source_id = w.node_id
            JOIN graph_nodes t
              ON t.id = e.target_id
            WHERE w.depth < ?2
              AND instr(w.path, ',' || e.target_id || ',') = 0
        ),
        hits AS (
            SELECT w.source_id, w.node_id AS target_id, w.depth, w.path, w.total_risk,
                   ROW_NUMBER() OVER (
                       PARTITION BY w.source_id, w.node_id
                       ORDER BY w.depth ASC, w.total_risk DESC
                   ) AS rn
            FROM walk w
            JOIN graph_nodes t ON t.id = w.node_id
            WHERE t.criticality = 'critical' AND w.source_id != w.node_id
        )
        SELECT source_id, target_id, depth, path, total_risk
        FROM hits
        WHERE rn = 1
        ORDER BY total_risk DESC
        LIMIT ?3";

    let mut stmt = conn.prepare_cached(sql).map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })?;

    let rows = stmt
        .query_map(
            params![organization_id, hop_limit, limit as i64],
            |row| {
                let path_blob: String = row.get(3)?;
                Ok(DeepPathRow {
                    source_id: row.get(0)?,
                    target_id: row.get(1)?,
                    depth: row.get(2)?,
                    node_path: path_blob
                        .split(',')
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect(),
                    total_risk: row.get(4)?,
                })
            },
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?);
    }
    Ok(result)
}
