//! Query facade — read-only views for external consumers.
//!
//! Adapts the internal graph into the `{nodes, links}` visualization payload
//! and exposes the high-risk listing. No mutation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use vantage_core::config::AnalysisConfig;
use vantage_core::types::{Criticality, NodeKind};

use crate::graph::AttackGraph;
use crate::paths::{HighRiskNode, PathAnalyzer};

/// A node in the force-layout payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    /// Grouping key for the frontend layout, same as the kind name.
    pub group: String,
    pub risk_score: f64,
    pub criticality: Criticality,
    pub account_id: String,
    pub region: String,
    /// Display size from the risk step function.
    pub size: u32,
}

/// A link in the force-layout payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisLink {
    pub source: String,
    pub target: String,
    pub kind: String,
    pub weight: f64,
    /// Alias of `weight` for link-thickness scaling.
    pub value: f64,
}

/// Aggregate counts attached to the visualization payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSummary {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub nodes_by_kind: BTreeMap<String, usize>,
}

/// Full-graph visualization payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizationPayload {
    pub nodes: Vec<VisNode>,
    pub links: Vec<VisLink>,
    pub summary: GraphSummary,
}

/// Build the visualization payload for the whole graph.
pub fn visualization(graph: &AttackGraph) -> VisualizationPayload {
    let mut nodes_by_kind: BTreeMap<String, usize> = BTreeMap::new();

    let nodes: Vec<VisNode> = graph
        .nodes()
        .map(|node| {
            *nodes_by_kind.entry(node.kind.name().to_string()).or_insert(0) += 1;
            VisNode {
                id: node.id.clone(),
                name: node.name.clone(),
                kind: node.kind,
                group: node.kind.name().to_string(),
                risk_score: node.risk_score,
                criticality: node.criticality,
                account_id: node.account_id.clone(),
                region: node.region.clone(),
                size: node_size(node.risk_score),
            }
        })
        .collect();

    let links: Vec<VisLink> = graph
        .edges()
        .map(|edge| VisLink {
            source: edge.source_id.clone(),
            target: edge.target_id.clone(),
            kind: edge.kind.name().to_string(),
            weight: edge.weight,
            value: edge.weight,
        })
        .collect();

    VisualizationPayload {
        summary: GraphSummary {
            total_nodes: nodes.len(),
            total_edges: links.len(),
            nodes_by_kind,
        },
        nodes,
        links,
    }
}

/// Top-N nodes by risk score with descendant counts.
pub fn high_risk_nodes(
    graph: &AttackGraph,
    config: &AnalysisConfig,
    limit: Option<usize>,
) -> Vec<HighRiskNode> {
    let analyzer = PathAnalyzer::new(graph, config);
    analyzer.high_risk_nodes(limit.unwrap_or_else(|| config.high_risk_limit()))
}

/// Display size step function. Thresholds are exclusive: a score of exactly
/// 80 falls in the next band down.
fn node_size(risk_score: f64) -> u32 {
    if risk_score > 80.0 {
        20
    } else if risk_score > 60.0 {
        15
    } else if risk_score > 40.0 {
        10
    } else {
        5
    }
}
