//! One-call analysis: diagnose, normalize, aggregate, hash.

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::config::{AnalysisConfig, EdgePolicy};
use crate::error::GraphError;
use crate::graph::{GraphDiagnostics, content_hash, diagnose, normalize_with};
use crate::metrics::global::{GlobalMetrics, aggregate_with};
use crate::metrics::node::StatusRules;
use crate::model::{EnrichedGraph, Graph, GraphEdge, GraphNode};

/// Everything a dashboard needs for one graph snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub graph: EnrichedGraph,
    pub metrics: GlobalMetrics,
    pub diagnostics: GraphDiagnostics,
    /// Hash of the input graph; see [`crate::graph::content_hash`].
    pub content_hash: String,
}

/// Analyze `graph` under `config`.
///
/// # Errors
///
/// Under [`EdgePolicy::Strict`], returns the first structural problem found
/// by [`diagnose`]. The lenient policy never fails.
#[instrument(skip_all, fields(nodes = graph.nodes.len(), edges = graph.edges.len()))]
pub fn analyze<N: GraphNode, E: GraphEdge>(
    graph: &Graph<N, E>,
    config: &AnalysisConfig,
) -> Result<Analysis, GraphError> {
    let diagnostics = diagnose(graph);

    if config.edge_policy == EdgePolicy::Strict {
        if let Some(err) = diagnostics.first_error() {
            return Err(err);
        }
    }

    for issue in &diagnostics.issues {
        warn!(?issue, "dropping malformed record");
    }

    let rules = StatusRules::from_thresholds(&config.thresholds);
    let enriched = normalize_with(graph, config.merge_policy, &rules);
    let metrics = aggregate_with(&enriched.nodes, &enriched.edges, config);
    let content_hash = content_hash(graph);

    info!(
        nodes = enriched.nodes.len(),
        edges = enriched.edges.len(),
        cohesion = metrics.cohesion_index,
        hash = %content_hash,
        "analysis complete"
    );

    Ok(Analysis {
        graph: enriched,
        metrics,
        diagnostics,
        content_hash,
    })
}
