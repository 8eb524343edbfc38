//! Graph traversals: forward reachability and bounded simple-path
//! enumeration.

use std::collections::VecDeque;

use petgraph::graph::NodeIndex;
use petgraph::Direction;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::AttackGraph;

/// Inline capacity covering the default hop limit without heap allocation.
type NodePath = SmallVec<[NodeIndex; 8]>;

/// All nodes reachable from `start` via directed edges of any length,
/// excluding `start` itself. Returned in BFS visit order so repeated runs on
/// the same graph are deterministic.
pub fn descendants(graph: &AttackGraph, start: NodeIndex) -> Vec<NodeIndex> {
    let mut visited = FxHashSet::default();
    let mut queue = VecDeque::new();
    let mut result = Vec::new();

    visited.insert(start);
    queue.push_back(start);

    while let Some(node) = queue.pop_front() {
        for next in graph.graph.neighbors_directed(node, Direction::Outgoing) {
            if visited.insert(next) {
                result.push(next);
                queue.push_back(next);
            }
        }
    }

    result
}

/// Enumerate all simple directed paths from `source` to `target` with at
/// most `max_hops` edges.
///
/// Worst-case exponential; the hop bound is the load-bearing cutoff. When
/// `source == target` the single-node path is returned.
pub fn simple_paths_bounded(
    graph: &AttackGraph,
    source: NodeIndex,
    target: NodeIndex,
    max_hops: u32,
) -> Vec<Vec<NodeIndex>> {
    let mut results = Vec::new();

    if source == target {
        results.push(vec![source]);
        return results;
    }

    let mut path = NodePath::new();
    path.push(source);
    let mut on_path = FxHashSet::default();
    on_path.insert(source);
    extend(graph, source, target, max_hops, &mut path, &mut on_path, &mut results);
    results
}

fn extend(
    graph: &AttackGraph,
    current: NodeIndex,
    target: NodeIndex,
    max_hops: u32,
    path: &mut NodePath,
    on_path: &mut FxHashSet<NodeIndex>,
    results: &mut Vec<Vec<NodeIndex>>,
) {
    // Edges used so far = path.len() - 1; taking a neighbor adds one more.
    let edges_after_step = path.len() as u32;

    // Parallel edges repeat a neighbor; each distinct node is stepped once.
    let mut stepped = NodePath::new();
    for next in graph.graph.neighbors_directed(current, Direction::Outgoing) {
        if stepped.contains(&next) {
            continue;
        }
        stepped.push(next);
        if next == target {
            if edges_after_step <= max_hops {
                let mut found = path.to_vec();
                found.push(next);
                results.push(found);
            }
            continue;
        }
        if edges_after_step >= max_hops || on_path.contains(&next) {
            continue;
        }

        path.push(next);
        on_path.insert(next);
        extend(graph, next, target, max_hops, path, on_path, results);
        path.pop();
        on_path.remove(&next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_core::types::{AttackEdge, AttackNode, Criticality, EdgeKind, NodeKind, PropertyMap};

    fn make_node(id: &str) -> AttackNode {
        AttackNode {
            id: id.to_string(),
            kind: NodeKind::ComputeInstance,
            name: id.to_string(),
            account_id: "1".to_string(),
            region: "us-east-1".to_string(),
            properties: PropertyMap::new(),
            risk_score: 0.0,
            criticality: Criticality::Medium,
        }
    }

    fn graph_with_edges(nodes: &[&str], edges: &[(&str, &str)]) -> AttackGraph {
        let mut g = AttackGraph::new();
        for id in nodes {
            g.add_node(make_node(id)).unwrap();
        }
        for (s, t) in edges {
            g.add_edge(AttackEdge::new(*s, *t, EdgeKind::CanAccess)).unwrap();
        }
        g
    }

    #[test]
    fn descendants_excludes_start() {
        // a -> b -> c, b -> d
        let g = graph_with_edges(&["a", "b", "c", "d"], &[("a", "b"), ("b", "c"), ("b", "d")]);
        let a = g.node_index("a").unwrap();
        let reached = descendants(&g, a);
        assert_eq!(reached.len(), 3);
        assert!(!reached.contains(&a));
    }

    #[test]
    fn descendants_handles_cycles() {
        let g = graph_with_edges(&["a", "b"], &[("a", "b"), ("b", "a")]);
        let a = g.node_index("a").unwrap();
        assert_eq!(descendants(&g, a).len(), 1);
    }

    #[test]
    fn diamond_yields_two_paths() {
        //     a
        //    / \
        //   b   c
        //    \ /
        //     d
        let g = graph_with_edges(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        );
        let a = g.node_index("a").unwrap();
        let d = g.node_index("d").unwrap();
        let paths = simple_paths_bounded(&g, a, d, 5);
        assert_eq!(paths.len(), 2);
        for p in &paths {
            assert_eq!(p.len(), 3);
        }
    }

    #[test]
    fn hop_limit_is_exclusive_of_longer_paths() {
        // a -> b -> c -> d and a -> d
        let g = graph_with_edges(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "c"), ("c", "d"), ("a", "d")],
        );
        let a = g.node_index("a").unwrap();
        let d = g.node_index("d").unwrap();

        let paths = simple_paths_bounded(&g, a, d, 2);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 2);

        let paths = simple_paths_bounded(&g, a, d, 3);
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn cycle_never_repeats_nodes() {
        let g = graph_with_edges(
            &["a", "b", "c"],
            &[("a", "b"), ("b", "a"), ("b", "c")],
        );
        let a = g.node_index("a").unwrap();
        let c = g.node_index("c").unwrap();
        let paths = simple_paths_bounded(&g, a, c, 5);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 3);
    }

    #[test]
    fn source_equals_target_is_trivial_path() {
        let g = graph_with_edges(&["a", "b"], &[("a", "b"), ("b", "a")]);
        let a = g.node_index("a").unwrap();
        let paths = simple_paths_bounded(&g, a, a, 5);
        assert_eq!(paths, vec![vec![a]]);
    }
}
