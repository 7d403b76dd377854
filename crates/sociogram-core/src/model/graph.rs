//! The graph aggregate: nodes, edges, and opaque metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::edge::{Edge, EnrichedEdge};
use crate::model::node::{EnrichedNode, NodeRecord, RawNode};

/// Descriptive metadata carried alongside a graph. Never read by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A sociogram: participants plus directed nominations between them.
///
/// Node order is irrelevant to every metric; edge order only affects which
/// of several duplicate nominations is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Graph<N, E> {
    pub nodes: Vec<N>,
    pub edges: Vec<E>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<GraphMetadata>,
}

impl<N, E> Graph<N, E> {
    #[must_use]
    pub const fn new(nodes: Vec<N>, edges: Vec<E>) -> Self {
        Self {
            nodes,
            edges,
            metadata: None,
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: GraphMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

/// Graph as built by the survey pipeline.
pub type RawGraph = Graph<RawNode, Edge>;
/// Graph as read from an input file (nodes may already carry metrics).
pub type InputGraph = Graph<NodeRecord, Edge>;
/// Graph returned by normalization.
pub type EnrichedGraph = Graph<EnrichedNode, EnrichedEdge>;
