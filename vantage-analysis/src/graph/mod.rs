//! In-memory attack graph — petgraph `StableDiGraph` with a string-id index.
//!
//! The graph is the system of record for path algorithms during one analysis
//! run. It is rebuilt from scratch per build and is not shared for mutation
//! across unrelated requests; read-only parallel queries are fine.

pub mod traversal;

use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use rustc_hash::FxHashMap;

use vantage_core::errors::GraphError;
use vantage_core::types::{AttackEdge, AttackNode};

/// Directed property graph of cloud resources and identity relationships.
pub struct AttackGraph {
    pub(crate) graph: StableDiGraph<AttackNode, AttackEdge>,
    index: FxHashMap<String, NodeIndex>,
}

impl AttackGraph {
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::new(),
            index: FxHashMap::default(),
        }
    }

    /// Insert a node, keyed by its id.
    ///
    /// Re-inserting an id with the same kind refreshes the node's data
    /// (properties and risk are derived per scan). Re-inserting with a
    /// different kind is a structural invariant violation.
    pub fn add_node(&mut self, node: AttackNode) -> Result<NodeIndex, GraphError> {
        if let Some(&idx) = self.index.get(&node.id) {
            let existing = &self.graph[idx];
            if existing.kind != node.kind {
                return Err(GraphError::ConflictingNode {
                    id: node.id,
                    existing: existing.kind.name(),
                    incoming: node.kind.name(),
                });
            }
            self.graph[idx] = node;
            return Ok(idx);
        }

        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(id, idx);
        Ok(idx)
    }

    /// Insert a directed edge. Both endpoints must already exist; self-loops
    /// are permitted.
    pub fn add_edge(&mut self, edge: AttackEdge) -> Result<(), GraphError> {
        let source = self.index.get(&edge.source_id).copied().ok_or_else(|| {
            GraphError::MissingEndpoint {
                src: edge.source_id.clone(),
                target: edge.target_id.clone(),
                endpoint: edge.source_id.clone(),
            }
        })?;
        let target = self.index.get(&edge.target_id).copied().ok_or_else(|| {
            GraphError::MissingEndpoint {
                src: edge.source_id.clone(),
                target: edge.target_id.clone(),
                endpoint: edge.target_id.clone(),
            }
        })?;

        self.graph.add_edge(source, target, edge);
        Ok(())
    }

    /// Look up a node index by resource id.
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node(&self, idx: NodeIndex) -> &AttackNode {
        &self.graph[idx]
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node indices in insertion order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &AttackNode> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &AttackEdge> {
        self.graph.edge_indices().map(|idx| &self.graph[idx])
    }

    /// The first edge from `source` to `target`, if any.
    pub fn edge_between(&self, source: NodeIndex, target: NodeIndex) -> Option<&AttackEdge> {
        self.graph
            .find_edge(source, target)
            .map(|e| &self.graph[e])
    }
}

impl Default for AttackGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_core::types::{Criticality, EdgeKind, NodeKind, PropertyMap};

    fn make_node(id: &str, kind: NodeKind) -> AttackNode {
        AttackNode {
            id: id.to_string(),
            kind,
            name: id.to_string(),
            account_id: "123456789012".to_string(),
            region: "us-east-1".to_string(),
            properties: PropertyMap::new(),
            risk_score: 10.0,
            criticality: Criticality::Medium,
        }
    }

    #[test]
    fn reinsert_same_kind_refreshes() {
        let mut g = AttackGraph::new();
        g.add_node(make_node("a", NodeKind::IamUser)).unwrap();
        let mut updated = make_node("a", NodeKind::IamUser);
        updated.risk_score = 55.0;
        g.add_node(updated).unwrap();

        assert_eq!(g.node_count(), 1);
        let idx = g.node_index("a").unwrap();
        assert_eq!(g.node(idx).risk_score, 55.0);
    }

    #[test]
    fn conflicting_kind_is_fatal() {
        let mut g = AttackGraph::new();
        g.add_node(make_node("a", NodeKind::IamUser)).unwrap();
        let err = g.add_node(make_node("a", NodeKind::StorageBucket)).unwrap_err();
        assert!(matches!(err, GraphError::ConflictingNode { .. }));
    }

    #[test]
    fn edge_requires_both_endpoints() {
        let mut g = AttackGraph::new();
        g.add_node(make_node("a", NodeKind::IamUser)).unwrap();

        let err = g
            .add_edge(AttackEdge::new("a", "missing", EdgeKind::CanAccess))
            .unwrap_err();
        assert!(matches!(err, GraphError::MissingEndpoint { .. }));
        assert_eq!(g.edge_count(), 0);

        g.add_node(make_node("b", NodeKind::StorageBucket)).unwrap();
        g.add_edge(AttackEdge::new("a", "b", EdgeKind::CanAccess)).unwrap();
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn self_loop_permitted() {
        let mut g = AttackGraph::new();
        g.add_node(make_node("a", NodeKind::IamRole)).unwrap();
        g.add_edge(AttackEdge::new("a", "a", EdgeKind::CanAssume)).unwrap();
        assert_eq!(g.edge_count(), 1);
    }
}
