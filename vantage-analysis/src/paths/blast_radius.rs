//! Blast radius — full forward reachability with aggregated risk and
//! remediation suggestions.

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use vantage_core::types::{Criticality, NodeKind};

use crate::graph::traversal::descendants;
use crate::graph::AttackGraph;

/// Reachable-set size beyond which a compute instance warrants network
/// segmentation.
const SEGMENTATION_THRESHOLD: usize = 10;
/// Reachable-set size beyond which zero-trust review is suggested for any
/// node kind.
const ZERO_TRUST_THRESHOLD: usize = 20;

/// A reachable high/critical node worth calling out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighValueTarget {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub risk_score: f64,
}

/// Everything transitively reachable from one node, with aggregate risk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlastRadius {
    pub node_id: String,
    pub node_name: String,
    pub node_kind: NodeKind,
    /// Forward-reachable node count, excluding the node itself.
    pub reachable_nodes: usize,
    /// Reachable nodes with high or critical criticality.
    pub critical_reachable: usize,
    /// Mean risk over the reachable set, 0 when nothing is reachable.
    pub average_risk: f64,
    /// Summed risk over the reachable set.
    pub total_risk: f64,
    /// Reachable high-value nodes in traversal order.
    pub high_value_targets: Vec<HighValueTarget>,
    pub recommendations: Vec<String>,
}

/// Compute the blast radius for a node known to be in the graph.
pub(crate) fn compute(graph: &AttackGraph, idx: NodeIndex) -> BlastRadius {
    let reachable = descendants(graph, idx);

    let mut total_risk = 0.0;
    let mut critical_reachable = 0;
    let mut high_value_targets = Vec::new();

    for &reached in &reachable {
        let node = graph.node(reached);
        total_risk += node.risk_score;
        if node.criticality.is_high_value() {
            critical_reachable += 1;
            high_value_targets.push(HighValueTarget {
                id: node.id.clone(),
                name: node.name.clone(),
                kind: node.kind,
                risk_score: node.risk_score,
            });
        }
    }

    let average_risk = if reachable.is_empty() {
        0.0
    } else {
        total_risk / reachable.len() as f64
    };

    let node = graph.node(idx);
    let recommendations = recommendations(node.kind, node.criticality, reachable.len());

    BlastRadius {
        node_id: node.id.clone(),
        node_name: node.name.clone(),
        node_kind: node.kind,
        reachable_nodes: reachable.len(),
        critical_reachable,
        average_risk,
        total_risk,
        high_value_targets,
        recommendations,
    }
}

/// Remediation suggestions keyed by the source node's kind and the size of
/// its reachable set.
fn recommendations(kind: NodeKind, criticality: Criticality, reachable: usize) -> Vec<String> {
    let mut suggestions: Vec<String> = Vec::new();

    match kind {
        NodeKind::IamRole => {
            if criticality == Criticality::Critical {
                suggestions.push("Apply least privilege to the role's attached policies".into());
                suggestions.push("Add condition clauses to the role trust policy".into());
                suggestions.push("Enable access analysis to surface unused permissions".into());
            }
        }
        NodeKind::ComputeInstance => {
            if reachable > SEGMENTATION_THRESHOLD {
                suggestions.push("Restrict the instance profile's permissions".into());
                suggestions.push("Move the instance to a private subnet".into());
                suggestions.push("Introduce network segmentation around the instance".into());
            }
        }
        NodeKind::StorageBucket => {
            suggestions.push("Block public access at the account level".into());
            suggestions.push("Attach a bucket policy with explicit conditions".into());
            suggestions.push("Enable object access logging".into());
        }
        _ => {}
    }

    if reachable > ZERO_TRUST_THRESHOLD {
        suggestions.push("Adopt zero-trust segmentation for this environment".into());
        suggestions.push("Review and reduce cross-service permissions".into());
        suggestions.push("Require just-in-time elevation for sensitive resources".into());
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_suggestions_always_present() {
        let s = recommendations(NodeKind::StorageBucket, Criticality::Medium, 0);
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn zero_trust_applies_to_any_kind() {
        let s = recommendations(NodeKind::Secret, Criticality::High, 21);
        assert_eq!(s.len(), 3);
        assert!(s[0].contains("zero-trust"));

        let s = recommendations(NodeKind::Secret, Criticality::High, 20);
        assert!(s.is_empty());
    }

    #[test]
    fn compute_instance_segmentation_gated_on_size() {
        let s = recommendations(NodeKind::ComputeInstance, Criticality::High, 10);
        assert!(s.is_empty());
        let s = recommendations(NodeKind::ComputeInstance, Criticality::High, 11);
        assert_eq!(s.len(), 3);
    }
}
