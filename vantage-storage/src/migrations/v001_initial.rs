//! V001: Initial schema — organization-tagged graph nodes and edges.

pub const MIGRATION_SQL: &str = r#"
-- Graph nodes, tagged by organization for full-replace semantics.
CREATE TABLE IF NOT EXISTS graph_nodes (
    id TEXT PRIMARY KEY,
    organization_id TEXT NOT NULL,
    kind TEXT NOT NULL,
    name TEXT NOT NULL,
    account_id TEXT NOT NULL,
    region TEXT NOT NULL,
    risk_score REAL NOT NULL,
    criticality TEXT NOT NULL,
    is_public INTEGER NOT NULL DEFAULT 0,
    properties TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (unixepoch())
) STRICT;

CREATE INDEX IF NOT EXISTS idx_graph_nodes_org
    ON graph_nodes(organization_id);
CREATE INDEX IF NOT EXISTS idx_graph_nodes_criticality
    ON graph_nodes(organization_id, criticality);
CREATE INDEX IF NOT EXISTS idx_graph_nodes_public
    ON graph_nodes(organization_id) WHERE is_public = 1;

-- Typed capability edges between nodes.
CREATE TABLE IF NOT EXISTS graph_edges (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    organization_id TEXT NOT NULL,
    source_id TEXT NOT NULL,
    target_id TEXT NOT NULL,
    kind TEXT NOT NULL,
    weight REAL NOT NULL DEFAULT 1.0,
    properties TEXT NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_graph_edges_org
    ON graph_edges(organization_id);
CREATE INDEX IF NOT EXISTS idx_graph_edges_source
    ON graph_edges(source_id);
CREATE INDEX IF NOT EXISTS idx_graph_edges_target
    ON graph_edges(target_id);
"#;
