//! Property tests over random classrooms.
//!
//! Graphs are drawn from a small id pool so duplicate edges, duplicate node
//! ids, self-loops and unknown endpoints all show up regularly.

use std::collections::HashSet;

use proptest::prelude::*;

use sociogram_core::config::{AnalysisConfig, EdgePolicy};
use sociogram_core::metrics::reciprocity::{ReciprocityIndex, reciprocity_ratio};
use sociogram_core::model::{Edge, EdgeKind, RawGraph, RawNode};
use sociogram_core::{aggregate, analyze, diagnose, normalize};

fn arb_kind() -> impl Strategy<Value = EdgeKind> {
    prop_oneof![Just(EdgeKind::Choice), Just(EdgeKind::Rejection)]
}

fn arb_edge(max_id: u8) -> impl Strategy<Value = Edge> {
    // One id past the pool so some edges dangle.
    (0..=max_id, 0..=max_id, arb_kind())
        .prop_map(|(s, t, kind)| Edge::new(s.to_string(), t.to_string(), kind))
}

fn arb_graph() -> impl Strategy<Value = RawGraph> {
    (0_u8..12).prop_flat_map(|n| {
        let repeats = prop::collection::vec(0..n.max(1), 0..3);
        (prop::collection::vec(arb_edge(n), 0..40), repeats).prop_map(move |(edges, repeats)| {
            let mut nodes: Vec<RawNode> = (0..n)
                .map(|i| RawNode::new(i.to_string(), format!("P{i}")))
                .collect();
            // Re-list some ids under a different label.
            for i in repeats.into_iter().filter(|i| *i < n) {
                nodes.push(RawNode::new(i.to_string(), format!("again {i}")));
            }
            RawGraph::new(nodes, edges)
        })
    })
}

fn distinct_ids(g: &RawGraph) -> usize {
    g.nodes.iter().map(|n| n.id.as_str()).collect::<HashSet<_>>().len()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn status_counts_sum_to_participant_count(g in arb_graph()) {
        let m = aggregate(&g.nodes, &g.edges);
        prop_assert_eq!(m.status_counts.total(), distinct_ids(&g));
    }

    #[test]
    fn ratios_stay_in_unit_interval(g in arb_graph()) {
        let m = aggregate(&g.nodes, &g.edges);
        for value in [
            m.positive_density,
            m.negative_density,
            m.choice_reciprocity,
            m.rejection_reciprocity,
        ] {
            prop_assert!((0.0..=1.0).contains(&value), "out of range: {}", value);
        }
        prop_assert!((-0.5..=1.0).contains(&m.cohesion_index));
    }

    #[test]
    fn node_indices_stay_in_unit_interval(g in arb_graph()) {
        for node in normalize(&g).nodes {
            prop_assert!((0.0..=1.0).contains(&node.metrics.popularity));
            prop_assert!((0.0..=1.0).contains(&node.metrics.antipathy));
        }
    }

    #[test]
    fn normalize_is_idempotent(g in arb_graph()) {
        let once = normalize(&g);
        let twice = normalize(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn enriched_edges_are_clean(g in arb_graph()) {
        let enriched = normalize(&g);
        prop_assert!(diagnose(&enriched).is_clean());
        prop_assert!(enriched.edges.iter().all(|e| e.source != e.target));
    }

    #[test]
    fn aggregate_agrees_before_and_after_normalize(g in arb_graph()) {
        let enriched = normalize(&g);
        prop_assert_eq!(
            aggregate(&g.nodes, &g.edges),
            aggregate(&enriched.nodes, &enriched.edges)
        );
    }

    #[test]
    fn index_matches_pairwise_scan(edges in prop::collection::vec(arb_edge(6), 0..30)) {
        let choices: Vec<Edge> = edges
            .into_iter()
            .filter(|e| e.kind == EdgeKind::Choice)
            .collect();
        let index = ReciprocityIndex::build(&choices);
        prop_assert!((index.ratio(&choices) - reciprocity_ratio(&choices)).abs() < 1e-12);
    }

    #[test]
    fn strict_succeeds_exactly_when_clean(g in arb_graph()) {
        let config = AnalysisConfig {
            edge_policy: EdgePolicy::Strict,
            ..AnalysisConfig::default()
        };
        prop_assert_eq!(analyze(&g, &config).is_ok(), diagnose(&g).is_clean());
    }
}
