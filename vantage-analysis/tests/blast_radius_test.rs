//! Blast radius and the high-risk node listing.

use vantage_analysis::graph::AttackGraph;
use vantage_analysis::paths::PathAnalyzer;
use vantage_core::config::AnalysisConfig;
use vantage_core::types::{
    AttackEdge, AttackNode, Criticality, EdgeKind, NodeKind, PropertyMap,
};

fn make_node(id: &str, risk: f64, criticality: Criticality) -> AttackNode {
    AttackNode {
        id: id.to_string(),
        kind: NodeKind::ComputeInstance,
        name: id.to_string(),
        account_id: "123456789012".to_string(),
        region: "us-east-1".to_string(),
        properties: PropertyMap::new(),
        risk_score: risk,
        criticality,
    }
}

fn connect(g: &mut AttackGraph, source: &str, target: &str) {
    g.add_edge(AttackEdge::new(source, target, EdgeKind::CanAccess)).unwrap();
}

#[test]
fn leaf_node_has_zero_radius() {
    let mut g = AttackGraph::new();
    g.add_node(make_node("leaf", 50.0, Criticality::Medium)).unwrap();
    g.add_node(make_node("other", 50.0, Criticality::Critical)).unwrap();
    connect(&mut g, "other", "leaf");

    let config = AnalysisConfig::default();
    let analyzer = PathAnalyzer::new(&g, &config);
    let radius = analyzer.blast_radius("leaf").unwrap();

    assert_eq!(radius.reachable_nodes, 0);
    assert_eq!(radius.critical_reachable, 0);
    assert_eq!(radius.average_risk, 0.0);
    assert_eq!(radius.total_risk, 0.0);
    assert!(radius.high_value_targets.is_empty());
}

#[test]
fn unknown_node_is_distinct_from_zero_radius() {
    let g = AttackGraph::new();
    let config = AnalysisConfig::default();
    let analyzer = PathAnalyzer::new(&g, &config);
    assert!(analyzer.blast_radius("ghost").is_none());
}

#[test]
fn radius_aggregates_reachable_risk() {
    // a -> b -> c, a -> d; d also reaches c (diamond-ish).
    let mut g = AttackGraph::new();
    g.add_node(make_node("a", 10.0, Criticality::Medium)).unwrap();
    g.add_node(make_node("b", 60.0, Criticality::High)).unwrap();
    g.add_node(make_node("c", 90.0, Criticality::Critical)).unwrap();
    g.add_node(make_node("d", 30.0, Criticality::Low)).unwrap();
    connect(&mut g, "a", "b");
    connect(&mut g, "b", "c");
    connect(&mut g, "a", "d");
    connect(&mut g, "d", "c");

    let config = AnalysisConfig::default();
    let analyzer = PathAnalyzer::new(&g, &config);
    let radius = analyzer.blast_radius("a").unwrap();

    assert_eq!(radius.reachable_nodes, 3);
    assert_eq!(radius.critical_reachable, 2);
    assert_eq!(radius.total_risk, 180.0);
    assert_eq!(radius.average_risk, 60.0);
    let mut ids: Vec<&str> = radius.high_value_targets.iter().map(|t| t.id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["b", "c"]);
}

#[test]
fn radius_matches_reference_closure_on_cyclic_graph() {
    let mut g = AttackGraph::new();
    for id in ["a", "b", "c", "d", "e"] {
        g.add_node(make_node(id, 10.0, Criticality::Medium)).unwrap();
    }
    // Cycle a -> b -> c -> a, plus c -> d; e disconnected.
    connect(&mut g, "a", "b");
    connect(&mut g, "b", "c");
    connect(&mut g, "c", "a");
    connect(&mut g, "c", "d");

    let config = AnalysisConfig::default();
    let analyzer = PathAnalyzer::new(&g, &config);
    let radius = analyzer.blast_radius("a").unwrap();

    // Reference closure from a: {b, c, d}; a excluded even though the cycle
    // returns to it.
    assert_eq!(radius.reachable_nodes, 3);
}

#[test]
fn high_risk_listing_limits_and_orders() {
    let mut g = AttackGraph::new();
    // Ten nodes; node8 and node9 tie at 95, the rest climb 5..75.
    for i in 0..10 {
        let risk = if i >= 8 { 95.0 } else { 5.0 + 10.0 * i as f64 };
        g.add_node(make_node(&format!("node{i}"), risk, Criticality::Medium)).unwrap();
    }

    let config = AnalysisConfig::default();
    let analyzer = PathAnalyzer::new(&g, &config);
    let top = analyzer.high_risk_nodes(3);

    assert_eq!(top.len(), 3);
    // The tie at 95 keeps insertion order: node8 before node9.
    assert_eq!(top[0].id, "node8");
    assert_eq!(top[1].id, "node9");
    assert_eq!(top[2].id, "node7");
    for pair in top.windows(2) {
        assert!(pair[0].risk_score >= pair[1].risk_score);
    }
}

#[test]
fn high_risk_listing_attaches_descendant_counts() {
    let mut g = AttackGraph::new();
    g.add_node(make_node("root", 90.0, Criticality::Critical)).unwrap();
    g.add_node(make_node("mid", 50.0, Criticality::Medium)).unwrap();
    g.add_node(make_node("leaf", 20.0, Criticality::Low)).unwrap();
    connect(&mut g, "root", "mid");
    connect(&mut g, "mid", "leaf");

    let config = AnalysisConfig::default();
    let analyzer = PathAnalyzer::new(&g, &config);
    let top = analyzer.high_risk_nodes(10);

    assert_eq!(top.len(), 3);
    assert_eq!(top[0].id, "root");
    assert_eq!(top[0].reachable_nodes, 2);
    assert_eq!(top[1].reachable_nodes, 1);
    assert_eq!(top[2].reachable_nodes, 0);
}

#[test]
fn wide_radius_triggers_zero_trust_recommendations() {
    let mut g = AttackGraph::new();
    g.add_node(make_node("hub", 80.0, Criticality::High)).unwrap();
    for i in 0..21 {
        g.add_node(make_node(&format!("spoke{i}"), 10.0, Criticality::Low)).unwrap();
        connect(&mut g, "hub", &format!("spoke{i}"));
    }

    let config = AnalysisConfig::default();
    let analyzer = PathAnalyzer::new(&g, &config);
    let radius = analyzer.blast_radius("hub").unwrap();

    assert_eq!(radius.reachable_nodes, 21);
    // Compute instance with >10 reachable plus the >20 zero-trust block.
    assert_eq!(radius.recommendations.len(), 6);
    assert!(radius.recommendations.iter().any(|r| r.contains("segmentation")));
    assert!(radius.recommendations.iter().any(|r| r.contains("zero-trust")));
}
