//! Graph normalization: the single step from raw input to enriched output.
//!
//! # Overview
//!
//! [`normalize`] takes any graph by reference and returns a new
//! [`EnrichedGraph`]:
//!
//! 1. **Nodes** are deduplicated by id (first wins). Each node gets
//!    [`NodeMetrics`]: kept from the input when present and the merge policy
//!    is [`MergePolicy::PreserveExisting`], computed otherwise.
//! 2. **Edges** are restricted to the usable set (see
//!    [`crate::graph::sanitize`]). Each gets an id (`source-target-type` when
//!    none was supplied) and a `reciprocal` flag.
//!
//! The input is never mutated. Because the function accepts enriched graphs
//! too, normalizing twice is a no-op under the default policy.

use tracing::{debug, instrument};

use crate::config::MergePolicy;
use crate::graph::sanitize::{unique_nodes, usable_edges};
use crate::metrics::node::{StatusRules, compute_node_metrics_with};
use crate::metrics::reciprocity::ReciprocityIndex;
use crate::model::{
    EnrichedEdge, EnrichedGraph, EnrichedNode, Graph, GraphEdge, GraphNode, NodeMetrics,
};

/// Normalize with the preserve-existing merge policy and default thresholds.
#[must_use]
pub fn normalize<N: GraphNode, E: GraphEdge>(graph: &Graph<N, E>) -> EnrichedGraph {
    normalize_with(graph, MergePolicy::PreserveExisting, &StatusRules::default())
}

/// Normalize with an explicit merge policy and status rule table.
#[must_use]
#[instrument(skip_all, fields(nodes = graph.nodes.len(), edges = graph.edges.len(), policy = ?policy))]
pub fn normalize_with<N: GraphNode, E: GraphEdge>(
    graph: &Graph<N, E>,
    policy: MergePolicy,
    rules: &StatusRules,
) -> EnrichedGraph {
    let nodes = unique_nodes(&graph.nodes);
    let usable = usable_edges(&graph.nodes, &graph.edges);
    let total = nodes.len();

    let mut preserved = 0_usize;
    let enriched_nodes: Vec<EnrichedNode> = nodes
        .into_iter()
        .map(|node| {
            let existing = match policy {
                MergePolicy::PreserveExisting => node.metrics().cloned(),
                MergePolicy::Recompute => None,
            };
            let metrics = if let Some(metrics) = existing {
                preserved += 1;
                metrics
            } else {
                compute_node_metrics_with(node.id(), &usable, total, rules)
            };
            enrich_node(node, metrics)
        })
        .collect();

    let index = ReciprocityIndex::build(&usable);
    let enriched_edges: Vec<EnrichedEdge> = usable
        .iter()
        .map(|edge| EnrichedEdge {
            id: edge.id().map_or_else(|| edge.derived_id(), str::to_string),
            source: edge.source().to_string(),
            target: edge.target().to_string(),
            kind: edge.kind(),
            question_id: edge.question_id().map(str::to_string),
            weight: edge.weight(),
            reciprocal: index.contains_mirror(edge),
        })
        .collect();

    debug!(
        nodes = enriched_nodes.len(),
        preserved,
        edges = enriched_edges.len(),
        dropped_edges = graph.edges.len() - enriched_edges.len(),
        "normalized graph"
    );

    Graph {
        nodes: enriched_nodes,
        edges: enriched_edges,
        metadata: graph.metadata.clone(),
    }
}

fn enrich_node<N: GraphNode>(node: &N, metrics: NodeMetrics) -> EnrichedNode {
    EnrichedNode {
        id: node.id().to_string(),
        label: node.label().to_string(),
        attributes: node.attributes().clone(),
        metrics,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
