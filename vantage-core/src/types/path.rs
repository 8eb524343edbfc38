//! Derived attack paths.

use serde::{Deserialize, Serialize};

use super::edge::AttackEdge;
use super::node::AttackNode;

/// An ordered walk through the attack graph, derived per query and never
/// stored.
///
/// `nodes` has length ≥ 1 and `edges` connects consecutive nodes, so
/// `edges.len() == nodes.len() - 1`. `total_risk` is the plain sum of node
/// risk scores along the path — deliberately not normalized by length, so
/// long walks through high-risk resources surface cumulative exposure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackPath {
    pub nodes: Vec<AttackNode>,
    pub edges: Vec<AttackEdge>,
    pub total_risk: f64,
    /// Number of edges traversed.
    pub path_length: usize,
    /// Ids of nodes along the path with high or critical criticality, in
    /// path order.
    pub critical_nodes: Vec<String>,
}
