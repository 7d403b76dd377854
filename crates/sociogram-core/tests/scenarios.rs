//! Known-classroom regression tests.
//!
//! Each test feeds a small hand-made survey through the public API, starting
//! from the JSON wire format where it matters. Expected values are worked
//! out by hand and hardcoded.

use sociogram_core::config::{AnalysisConfig, EdgePolicy, MergePolicy};
use sociogram_core::error::ErrorCode;
use sociogram_core::graph::Issue;
use sociogram_core::metrics::global::GlobalMetrics;
use sociogram_core::model::{Edge, EdgeKind, InputGraph, RawGraph, RawNode, Status};
use sociogram_core::{aggregate, analyze, compute_node_metrics, is_reciprocal, normalize};

fn approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn classroom(ids: &[&str], edges: Vec<Edge>) -> RawGraph {
    RawGraph::new(
        ids.iter().map(|id| RawNode::new(*id, format!("Student {id}"))).collect(),
        edges,
    )
}

// ===========================================================================
// One mutual pair plus a loner
//
//   1 <-> 2      3
// ===========================================================================

#[test]
fn mutual_pair_and_isolate() {
    let g = classroom(&["1", "2", "3"], vec![Edge::choice("1", "2"), Edge::choice("2", "1")]);
    let enriched = normalize(&g);

    let one = &enriched.nodes[0].metrics;
    assert_eq!(one.choices_received, 1);
    assert_eq!(one.choices_given, 1);
    approx(one.popularity, 0.5);
    assert_eq!(one.status, Status::Popular);
    assert_eq!(enriched.nodes[1].metrics.status, Status::Popular);
    assert_eq!(enriched.nodes[2].metrics.status, Status::Isolated);
    assert!(enriched.edges.iter().all(|e| e.reciprocal));

    let metrics = aggregate(&enriched.nodes, &enriched.edges);
    approx(metrics.choice_reciprocity, 1.0);
    approx(metrics.positive_density, 0.33);
    assert_eq!(metrics.status_counts.popular, 2);
    assert_eq!(metrics.status_counts.isolated, 1);
    assert_eq!(metrics.clusters.len(), 1);
    assert_eq!(metrics.clusters[0].members, vec!["1", "2"]);
}

// ===========================================================================
// A single rejection between two students
// ===========================================================================

#[test]
fn single_rejection() {
    let g = classroom(&["1", "2"], vec![Edge::rejection("1", "2")]);
    let enriched = normalize(&g);

    let two = &enriched.nodes[1].metrics;
    assert_eq!(two.rejections_received, 1);
    approx(two.antipathy, 1.0);
    assert_eq!(two.status, Status::Rejected);
    assert_eq!(enriched.nodes[0].metrics.status, Status::Isolated);
    assert_eq!(enriched.nodes[0].metrics.rejections_given, 1);

    let metrics = aggregate(&enriched.nodes, &enriched.edges);
    approx(metrics.negative_density, 0.5);
    approx(metrics.positive_density, 0.0);
    approx(metrics.cohesion_index, -0.25);
    approx(metrics.choice_reciprocity, 0.0);
    approx(metrics.rejection_reciprocity, 0.0);
}

// ===========================================================================
// Empty survey
// ===========================================================================

#[test]
fn empty_graph_yields_zero_object() {
    let g = RawGraph::default();
    let enriched = normalize(&g);
    assert!(enriched.nodes.is_empty());
    assert!(enriched.edges.is_empty());

    let metrics = aggregate(&enriched.nodes, &enriched.edges);
    assert_eq!(metrics, GlobalMetrics::default());

    let json = serde_json::to_value(&metrics).unwrap();
    assert_eq!(json["cohesionIndex"], 0.0);
    assert_eq!(json["statusCounts"]["leader"], 0);
    assert!(json.get("clusters").is_none());
}

// ===========================================================================
// Star: everybody picks 1
//
//   2 -> 1 <- 3
//        ^
//        4
// ===========================================================================

#[test]
fn star_center_is_leader() {
    let g = classroom(
        &["1", "2", "3", "4"],
        vec![Edge::choice("2", "1"), Edge::choice("3", "1"), Edge::choice("4", "1")],
    );
    let metrics = compute_node_metrics("1", &g.edges, g.nodes.len());
    assert_eq!(metrics.choices_received, 3);
    approx(metrics.popularity, 1.0);
    assert_eq!(metrics.status, Status::Leader);

    let global = aggregate(&g.nodes, &g.edges);
    assert_eq!(global.status_counts.leader, 1);
    assert_eq!(global.status_counts.isolated, 3);
    approx(global.choice_reciprocity, 0.0);
    assert!(global.clusters.is_empty());
}

#[test]
fn one_rejection_demotes_leader_to_popular() {
    let g = classroom(
        &["1", "2", "3", "4"],
        vec![
            Edge::choice("2", "1"),
            Edge::choice("3", "1"),
            Edge::choice("4", "1"),
            Edge::rejection("2", "1"),
        ],
    );
    let enriched = normalize(&g);
    assert_eq!(enriched.nodes[0].metrics.status, Status::Popular);
    approx(enriched.nodes[0].metrics.antipathy, 0.33);
}

#[test]
fn reciprocity_requires_same_type() {
    let edges = vec![Edge::choice("1", "2"), Edge::rejection("2", "1")];
    assert!(!is_reciprocal(&edges[0], &edges));
    let g = classroom(&["1", "2"], edges);
    let enriched = normalize(&g);
    assert!(enriched.edges.iter().all(|e| !e.reciprocal));
}

// ===========================================================================
// Wire format
// ===========================================================================

const SURVEY_JSON: &str = r#"{
    "nodes": [
        {"id": "a", "label": "Ana", "attributes": {"gender": "f"}},
        {"id": "b", "label": "Ben"},
        {"id": "c", "label": "Cy", "metrics": {
            "choicesReceived": 5, "choicesGiven": 0,
            "rejectionsReceived": 0, "rejectionsGiven": 0,
            "popularity": 1.0, "antipathy": 0.0, "status": "leader"
        }}
    ],
    "edges": [
        {"source": "a", "target": "b", "type": "choice", "questionId": "q1"},
        {"source": "b", "target": "a", "type": "choice", "questionId": "q1"},
        {"source": "a", "target": "c", "type": "rejection", "weight": 2.0}
    ],
    "metadata": {"title": "Class 4A", "createdAt": "2024-09-01T08:00:00Z"}
}"#;

#[test]
fn json_survey_round_trip_through_pipeline() {
    let input: InputGraph = serde_json::from_str(SURVEY_JSON).unwrap();
    let enriched = normalize(&input);

    // Pre-attached metrics survive under the default policy.
    assert_eq!(enriched.nodes[2].metrics.choices_received, 5);
    assert_eq!(enriched.nodes[2].metrics.status, Status::Leader);
    assert_eq!(enriched.nodes[0].attributes["gender"], "f");

    assert_eq!(enriched.edges[0].id, "a-b-choice");
    assert_eq!(enriched.edges[2].kind, EdgeKind::Rejection);
    assert_eq!(enriched.edges[2].weight, Some(2.0));
    assert_eq!(enriched.edges[0].question_id.as_deref(), Some("q1"));

    let out = serde_json::to_value(&enriched).unwrap();
    assert_eq!(out["edges"][2]["type"], "rejection");
    assert_eq!(out["edges"][0]["reciprocal"], true);
    assert_eq!(out["nodes"][1]["metrics"]["status"], "popular");
    assert_eq!(out["metadata"]["title"], "Class 4A");
}

#[test]
fn recompute_policy_overrides_attached_metrics() {
    let input: InputGraph = serde_json::from_str(SURVEY_JSON).unwrap();
    let config = AnalysisConfig {
        merge_policy: MergePolicy::Recompute,
        ..AnalysisConfig::default()
    };
    let analysis = analyze(&input, &config).unwrap();
    let c = &analysis.graph.nodes[2].metrics;
    assert_eq!(c.choices_received, 0);
    assert_eq!(c.rejections_received, 1);
    assert_eq!(c.status, Status::Rejected);
    assert_eq!(analysis.metrics.status_counts.leader, 0);
}

#[test]
fn unknown_edge_type_is_rejected_at_parse() {
    let json = r#"{"nodes": [], "edges": [{"source": "a", "target": "b", "type": "neutral"}]}"#;
    assert!(serde_json::from_str::<InputGraph>(json).is_err());
}

// ===========================================================================
// Edge policies
// ===========================================================================

fn messy() -> RawGraph {
    classroom(
        &["1", "2", "3"],
        vec![
            Edge::choice("1", "2"),
            Edge::choice("1", "2"),
            Edge::choice("3", "3"),
            Edge::rejection("2", "ghost"),
            Edge::choice("2", "1"),
        ],
    )
}

#[test]
fn lenient_analysis_drops_and_reports() {
    let analysis = analyze(&messy(), &AnalysisConfig::default()).unwrap();

    assert_eq!(analysis.graph.edges.len(), 2);
    assert_eq!(analysis.diagnostics.dropped_edge_count(), 3);
    assert!(matches!(
        analysis.diagnostics.issues[0],
        Issue::DuplicateEdge { position: 1, .. }
    ));
    assert!(matches!(
        analysis.diagnostics.issues[1],
        Issue::SelfLoop { position: 2, .. }
    ));
    assert!(matches!(
        &analysis.diagnostics.issues[2],
        Issue::UnknownNode { position: 3, node, .. } if node == "ghost"
    ));

    approx(analysis.metrics.positive_density, 0.33);
    approx(analysis.metrics.negative_density, 0.0);
    approx(analysis.metrics.choice_reciprocity, 1.0);
    assert_eq!(analysis.metrics.status_counts.total(), 3);
}

#[test]
fn strict_analysis_fails_on_first_problem() {
    let config = AnalysisConfig {
        edge_policy: EdgePolicy::Strict,
        ..AnalysisConfig::default()
    };
    let err = analyze(&messy(), &config).unwrap_err();
    assert_eq!(err.code(), ErrorCode::DuplicateEdge);
    assert_eq!(err.to_string(), "duplicate choice nomination 1 -> 2");
}

#[test]
fn hash_tracks_input_changes() {
    let base = analyze(&messy(), &AnalysisConfig::default()).unwrap();
    let again = analyze(&messy(), &AnalysisConfig::default()).unwrap();
    assert_eq!(base.content_hash, again.content_hash);

    let mut changed = messy();
    changed.edges.pop();
    let other = analyze(&changed, &AnalysisConfig::default()).unwrap();
    assert_ne!(base.content_hash, other.content_hash);
}
