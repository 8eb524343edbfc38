//! Path analysis — ranked attack paths, blast radius, high-risk listing.

pub mod blast_radius;

pub use blast_radius::{BlastRadius, HighValueTarget};

use petgraph::graph::NodeIndex;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use vantage_core::config::AnalysisConfig;
use vantage_core::types::{AttackPath, Criticality, NodeKind, PropertyMap};

use crate::graph::traversal::{descendants, simple_paths_bounded};
use crate::graph::AttackGraph;

/// Entry in the high-risk node listing: how risky, and how much it can
/// reach.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighRiskNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub account_id: String,
    pub region: String,
    pub risk_score: f64,
    pub criticality: Criticality,
    /// Forward-reachable node count (blast-radius size).
    pub reachable_nodes: usize,
    pub properties: PropertyMap,
}

/// Read-only path queries over one built graph.
pub struct PathAnalyzer<'a> {
    graph: &'a AttackGraph,
    max_path_length: u32,
    max_paths: usize,
}

impl<'a> PathAnalyzer<'a> {
    pub fn new(graph: &'a AttackGraph, config: &AnalysisConfig) -> Self {
        Self {
            graph,
            max_path_length: config.max_path_length(),
            max_paths: config.max_paths(),
        }
    }

    /// Find attack paths, ranked by descending total risk, truncated to the
    /// configured cap.
    ///
    /// Three modes:
    /// - source and target: all bounded simple paths between the pair;
    /// - source only: paths from the source to every high/critical node;
    /// - neither: paths between every unordered pair of critical nodes, in
    ///   both directions.
    ///
    /// An id absent from the graph yields no paths for that computation —
    /// never an error. With equal source and target the single-node path is
    /// returned.
    pub fn find_attack_paths(
        &self,
        source_id: Option<&str>,
        target_id: Option<&str>,
    ) -> Vec<AttackPath> {
        let mut paths = match (source_id, target_id) {
            (Some(source), Some(target)) => {
                match (self.graph.node_index(source), self.graph.node_index(target)) {
                    (Some(s), Some(t)) => self.paths_between(s, t),
                    _ => Vec::new(),
                }
            }
            (Some(source), None) => match self.graph.node_index(source) {
                Some(s) => {
                    let targets: Vec<NodeIndex> = self
                        .graph
                        .node_indices()
                        .filter(|&idx| idx != s && self.graph.node(idx).criticality.is_high_value())
                        .collect();
                    targets
                        .iter()
                        .flat_map(|&t| self.paths_between(s, t))
                        .collect()
                }
                None => Vec::new(),
            },
            _ => {
                let critical: Vec<NodeIndex> = self
                    .graph
                    .node_indices()
                    .filter(|&idx| self.graph.node(idx).criticality == Criticality::Critical)
                    .collect();

                let mut pairs = Vec::new();
                for i in 0..critical.len() {
                    for j in (i + 1)..critical.len() {
                        pairs.push((critical[i], critical[j]));
                    }
                }

                pairs
                    .par_iter()
                    .flat_map_iter(|&(a, b)| {
                        let mut found = self.paths_between(a, b);
                        found.extend(self.paths_between(b, a));
                        found
                    })
                    .collect()
            }
        };

        // Plain risk-sum ranking; stable sort keeps input order on ties.
        paths.sort_by(|a, b| {
            b.total_risk
                .partial_cmp(&a.total_risk)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        paths.truncate(self.max_paths);
        paths
    }

    /// Blast radius for a node id. `None` when the id is not in the graph —
    /// distinct from a present node with zero reachable descendants.
    pub fn blast_radius(&self, node_id: &str) -> Option<BlastRadius> {
        let idx = self.graph.node_index(node_id)?;
        Some(blast_radius::compute(self.graph, idx))
    }

    /// Top `limit` nodes by risk score (ties broken by insertion order),
    /// each annotated with its forward-reachable descendant count.
    pub fn high_risk_nodes(&self, limit: usize) -> Vec<HighRiskNode> {
        let mut indices: Vec<NodeIndex> = self.graph.node_indices().collect();
        indices.sort_by(|&a, &b| {
            self.graph
                .node(b)
                .risk_score
                .partial_cmp(&self.graph.node(a).risk_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        indices.truncate(limit);

        indices
            .par_iter()
            .map(|&idx| {
                let node = self.graph.node(idx);
                HighRiskNode {
                    id: node.id.clone(),
                    name: node.name.clone(),
                    kind: node.kind,
                    account_id: node.account_id.clone(),
                    region: node.region.clone(),
                    risk_score: node.risk_score,
                    criticality: node.criticality,
                    reachable_nodes: descendants(self.graph, idx).len(),
                    properties: node.properties.clone(),
                }
            })
            .collect()
    }

    fn paths_between(&self, source: NodeIndex, target: NodeIndex) -> Vec<AttackPath> {
        simple_paths_bounded(self.graph, source, target, self.max_path_length)
            .iter()
            .map(|node_path| self.to_attack_path(node_path))
            .collect()
    }

    fn to_attack_path(&self, node_path: &[NodeIndex]) -> AttackPath {
        let mut nodes = Vec::with_capacity(node_path.len());
        let mut critical_nodes = Vec::new();
        let mut total_risk = 0.0;

        for &idx in node_path {
            let node = self.graph.node(idx);
            total_risk += node.risk_score;
            if node.criticality.is_high_value() {
                critical_nodes.push(node.id.clone());
            }
            nodes.push(node.clone());
        }

        let mut edges = Vec::with_capacity(node_path.len().saturating_sub(1));
        for window in node_path.windows(2) {
            if let Some(edge) = self.graph.edge_between(window[0], window[1]) {
                edges.push(edge.clone());
            }
        }

        AttackPath {
            path_length: edges.len(),
            nodes,
            edges,
            total_risk,
            critical_nodes,
        }
    }
}
