//! Property tests for the traversal and scoring invariants.

use proptest::prelude::*;
use rustc_hash::FxHashSet;

use vantage_analysis::graph::traversal::{descendants, simple_paths_bounded};
use vantage_analysis::graph::AttackGraph;
use vantage_analysis::risk;
use vantage_core::types::{
    AttackEdge, AttackNode, Criticality, EdgeKind, IdentityRecord, NodeKind, PrincipalKind,
    PropertyMap,
};

const NODES: usize = 8;

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

fn build_graph(edges: &[(usize, usize)]) -> AttackGraph {
    let mut g = AttackGraph::new();
    for i in 0..NODES {
        g.add_node(make_node(&format!("n{i}"))).unwrap();
    }
    for (s, t) in edges {
        g.add_edge(AttackEdge::new(
            format!("n{s}"),
            format!("n{t}"),
            EdgeKind::CanAccess,
        ))
        .unwrap();
    }
    g
}

/// Reference transitive closure by naive fixpoint iteration.
fn reference_closure(edges: &[(usize, usize)], start: usize) -> FxHashSet<usize> {
    let mut reachable: FxHashSet<usize> = FxHashSet::default();
    let mut changed = true;
    while changed {
        changed = false;
        for &(s, t) in edges {
            if (s == start || reachable.contains(&s)) && t != start && reachable.insert(t) {
                changed = true;
            }
        }
    }
    reachable
}

proptest! {
    #[test]
    fn paths_are_simple_and_bounded(
        edges in proptest::collection::vec((0..NODES, 0..NODES), 0..40),
        max_hops in 1u32..5,
    ) {
        let g = build_graph(&edges);
        let source = g.node_index("n0").unwrap();
        let target = g.node_index(&format!("n{}", NODES - 1)).unwrap();

        for path in simple_paths_bounded(&g, source, target, max_hops) {
            // No repeated node.
            let unique: FxHashSet<_> = path.iter().collect();
            prop_assert_eq!(unique.len(), path.len());
            // Within the hop bound.
            prop_assert!(path.len() as u32 - 1 <= max_hops);
            // Starts and ends where asked.
            prop_assert_eq!(path[0], source);
            prop_assert_eq!(*path.last().unwrap(), target);
        }
    }

    #[test]
    fn descendants_match_reference_closure(
        edges in proptest::collection::vec((0..NODES, 0..NODES), 0..40),
        start in 0..NODES,
    ) {
        let g = build_graph(&edges);
        let start_idx = g.node_index(&format!("n{start}")).unwrap();

        let got: FxHashSet<usize> = descendants(&g, start_idx)
            .into_iter()
            .map(|idx| {
                g.node(idx).id.trim_start_matches('n').parse::<usize>().unwrap()
            })
            .collect();

        // Closure may re-reach the start through a cycle; descendants
        // excludes it by contract.
        let mut expected = reference_closure(&edges, start);
        expected.remove(&start);
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn identity_scores_always_clamp(
        is_role in any::<bool>(),
        admin in any::<bool>(),
        inline_wildcard in any::<bool>(),
        mfa_enabled in any::<bool>(),
        access_key_count in 0u32..5,
        trusted_root in any::<bool>(),
        wildcard_trust in any::<bool>(),
        external_count in 0usize..3,
    ) {
        let record = IdentityRecord {
            principal_id: "arn:aws:iam::1:principal/p".to_string(),
            kind: if is_role { PrincipalKind::Role } else { PrincipalKind::User },
            name: "p".to_string(),
            attached_policies: if admin {
                vec!["AdministratorAccess".to_string()]
            } else {
                vec!["ReadOnlyAccess".to_string()]
            },
            inline_wildcard,
            mfa_enabled,
            access_key_count,
            trusted_root,
            wildcard_trust,
            external_trust_accounts: vec!["999999999999".to_string(); external_count],
            assumable_by: vec![],
        };

        let (score, criticality) = risk::score_identity(&record);
        prop_assert!((0.0..=100.0).contains(&score));
        // Identities carry no tier override: criticality follows the score.
        prop_assert_eq!(criticality, risk::tier(score));
    }
}
