//! Group-level metrics for one graph snapshot.
//!
//! # Metrics Provided
//!
//! - **positive_density** / **negative_density**: observed choice (rejection)
//!   edges over the `n * (n - 1)` possible directed edges. 0 when `n < 2`.
//! - **cohesion_index**: `positive_density - 0.5 * negative_density`. A
//!   signed heuristic, negative when rejections dominate; not bounded to
//!   `[0, 1]`.
//! - **choice_reciprocity** / **rejection_reciprocity**: share of edges of
//!   that type whose mirror exists. 0 when there are no edges of the type.
//! - **status_counts**: nodes per status bucket; always sums to `n`.
//!
//! `n` counts distinct participants: a repeated node id counts once, with
//! the first occurrence winning, exactly as in normalization.
//! - **clusters**: optional mutual-choice groups (see [`super::clusters`]).
//!
//! Ratios are rounded to two decimals. Edges referencing unknown nodes,
//! self-loops and repeated `(source, target, type)` triples contribute
//! nothing.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::{AnalysisConfig, MergePolicy};
use crate::graph::sanitize::{unique_nodes, usable_edges};
use crate::metrics::clusters::{ClusterSummary, mutual_choice_clusters};
use crate::metrics::node::{StatusRules, compute_node_metrics_with};
use crate::metrics::reciprocity::ReciprocityIndex;
use crate::metrics::{ratio, round2};
use crate::model::{EdgeKind, GraphEdge, GraphNode, Status};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Number of nodes in each status bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub leader: usize,
    pub popular: usize,
    pub normal: usize,
    pub isolated: usize,
    pub rejected: usize,
}

impl StatusCounts {
    /// Count in the bucket for `status`.
    #[must_use]
    pub const fn get(&self, status: Status) -> usize {
        match status {
            Status::Leader => self.leader,
            Status::Popular => self.popular,
            Status::Normal => self.normal,
            Status::Isolated => self.isolated,
            Status::Rejected => self.rejected,
        }
    }

    pub const fn increment(&mut self, status: Status) {
        match status {
            Status::Leader => self.leader += 1,
            Status::Popular => self.popular += 1,
            Status::Normal => self.normal += 1,
            Status::Isolated => self.isolated += 1,
            Status::Rejected => self.rejected += 1,
        }
    }

    /// Sum over all buckets.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.leader + self.popular + self.normal + self.isolated + self.rejected
    }
}

/// Aggregate metrics for one graph. `Default` is the zero-valued object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalMetrics {
    pub cohesion_index: f64,
    pub positive_density: f64,
    pub negative_density: f64,
    pub choice_reciprocity: f64,
    pub rejection_reciprocity: f64,
    pub status_counts: StatusCounts,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clusters: Vec<ClusterSummary>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Aggregate with the default configuration.
#[must_use]
pub fn aggregate<N: GraphNode, E: GraphEdge>(nodes: &[N], edges: &[E]) -> GlobalMetrics {
    aggregate_with(nodes, edges, &AnalysisConfig::default())
}

/// Aggregate using `config` for thresholds, merge policy and clustering.
///
/// Nodes that carry metrics contribute their attached status unless the
/// merge policy is [`MergePolicy::Recompute`]; the rest are classified from
/// `edges`.
#[must_use]
#[instrument(skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
pub fn aggregate_with<N: GraphNode, E: GraphEdge>(
    nodes: &[N],
    edges: &[E],
    config: &AnalysisConfig,
) -> GlobalMetrics {
    let participants = unique_nodes(nodes);
    let n = participants.len();
    if n == 0 {
        return GlobalMetrics::default();
    }

    let usable = usable_edges(nodes, edges);
    let (choices, rejections): (Vec<&E>, Vec<&E>) = usable
        .iter()
        .copied()
        .partition(|e| e.kind() == EdgeKind::Choice);

    let max_possible = n * (n - 1);
    let positive = ratio(choices.len(), max_possible);
    let negative = ratio(rejections.len(), max_possible);

    let index = ReciprocityIndex::build(&usable);
    let choice_reciprocity = round2(index.ratio(&choices));
    let rejection_reciprocity = round2(index.ratio(&rejections));

    let rules = StatusRules::from_thresholds(&config.thresholds);
    let mut status_counts = StatusCounts::default();
    for node in participants {
        let attached = match config.merge_policy {
            MergePolicy::PreserveExisting => node.metrics().map(|m| m.status),
            MergePolicy::Recompute => None,
        };
        let status = attached
            .unwrap_or_else(|| compute_node_metrics_with(node.id(), &usable, n, &rules).status);
        status_counts.increment(status);
    }

    let clusters = if config.clusters.enabled {
        mutual_choice_clusters(&choices, &index, config.clusters.min_size)
    } else {
        Vec::new()
    };

    let metrics = GlobalMetrics {
        cohesion_index: round2(0.5_f64.mul_add(-negative, positive)),
        positive_density: round2(positive),
        negative_density: round2(negative),
        choice_reciprocity,
        rejection_reciprocity,
        status_counts,
        clusters,
    };

    debug!(
        cohesion = metrics.cohesion_index,
        positive = metrics.positive_density,
        negative = metrics.negative_density,
        clusters = metrics.clusters.len(),
        "aggregated group metrics"
    );

    metrics
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
