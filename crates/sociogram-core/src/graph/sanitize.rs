//! Structural checks on an input graph.
//!
//! The engine trusts its input but degrades gracefully when it should not
//! have. Four kinds of problem are recognised:
//!
//! - an edge whose source or target is not a node id,
//! - a self-loop (source == target),
//! - a repeated `(source, target, type)` triple (every occurrence after the
//!   first),
//! - a repeated node id (every occurrence after the first).
//!
//! [`usable_edges`] is the edge subset every metric is computed over: the
//! edges with none of the problems above, in input order. [`diagnose`]
//! reports what was left out.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::GraphError;
use crate::model::{EdgeKind, Graph, GraphEdge, GraphNode};

/// One structural problem, located by position in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum Issue {
    UnknownNode {
        position: usize,
        edge: String,
        node: String,
    },
    SelfLoop {
        position: usize,
        edge: String,
        node: String,
    },
    DuplicateEdge {
        position: usize,
        edge: String,
        source: String,
        target: String,
        kind: EdgeKind,
    },
    DuplicateNode {
        position: usize,
        id: String,
    },
}

impl Issue {
    /// The equivalent hard error, as raised under the strict policy.
    #[must_use]
    pub fn to_error(&self) -> GraphError {
        match self {
            Self::UnknownNode { edge, node, .. } => GraphError::UnknownNode {
                edge: edge.clone(),
                node: node.clone(),
            },
            Self::SelfLoop { edge, node, .. } => GraphError::SelfLoop {
                edge: edge.clone(),
                node: node.clone(),
            },
            Self::DuplicateEdge {
                source,
                target,
                kind,
                ..
            } => GraphError::DuplicateEdge {
                source_id: source.clone(),
                target_id: target.clone(),
                kind: *kind,
            },
            Self::DuplicateNode { id, .. } => GraphError::DuplicateNode { id: id.clone() },
        }
    }
}

/// Everything [`usable_edges`] and normalization leave out of a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphDiagnostics {
    /// Node issues first, then edge issues, each in input order.
    pub issues: Vec<Issue>,
}

impl GraphDiagnostics {
    /// `true` when nothing was dropped.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// First issue as a hard error, if any.
    #[must_use]
    pub fn first_error(&self) -> Option<GraphError> {
        self.issues.first().map(Issue::to_error)
    }

    /// Number of edges that were dropped.
    #[must_use]
    pub fn dropped_edge_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| !matches!(i, Issue::DuplicateNode { .. }))
            .count()
    }

    /// Number of node records that were dropped.
    #[must_use]
    pub fn dropped_node_count(&self) -> usize {
        self.issues.len() - self.dropped_edge_count()
    }
}

/// Report every structural problem in `graph`.
#[must_use]
pub fn diagnose<N: GraphNode, E: GraphEdge>(graph: &Graph<N, E>) -> GraphDiagnostics {
    let mut issues = Vec::new();

    let mut seen_nodes = HashSet::new();
    for (position, node) in graph.nodes.iter().enumerate() {
        if !seen_nodes.insert(node.id()) {
            issues.push(Issue::DuplicateNode {
                position,
                id: node.id().to_string(),
            });
        }
    }

    scan_edges(&graph.nodes, &graph.edges, |issue| issues.push(issue));
    GraphDiagnostics { issues }
}

/// Edges that every metric is computed over.
///
/// Drops edges with an unknown endpoint, self-loops, and every repeat of a
/// `(source, target, type)` triple after its first occurrence. Input order is
/// preserved.
#[must_use]
pub fn usable_edges<'a, N: GraphNode, E: GraphEdge>(nodes: &[N], edges: &'a [E]) -> Vec<&'a E> {
    scan_edges(nodes, edges, |_| {})
}

/// Unique nodes, first occurrence of each id wins.
#[must_use]
pub fn unique_nodes<N: GraphNode>(nodes: &[N]) -> Vec<&N> {
    let mut seen = HashSet::new();
    nodes.iter().filter(|n| seen.insert(n.id())).collect()
}

fn scan_edges<'a, N: GraphNode, E: GraphEdge>(
    nodes: &[N],
    edges: &'a [E],
    mut on_issue: impl FnMut(Issue),
) -> Vec<&'a E> {
    let known: HashSet<&str> = nodes.iter().map(GraphNode::id).collect();
    let mut seen: HashSet<(&str, &str, EdgeKind)> = HashSet::with_capacity(edges.len());
    let mut usable = Vec::with_capacity(edges.len());

    for (position, edge) in edges.iter().enumerate() {
        let label = || edge.id().map_or_else(|| edge.derived_id(), str::to_string);

        if let Some(missing) = [edge.source(), edge.target()]
            .into_iter()
            .find(|id| !known.contains(id))
        {
            on_issue(Issue::UnknownNode {
                position,
                edge: label(),
                node: missing.to_string(),
            });
            continue;
        }

        if edge.is_self_loop() {
            on_issue(Issue::SelfLoop {
                position,
                edge: label(),
                node: edge.source().to_string(),
            });
            continue;
        }

        if !seen.insert((edge.source(), edge.target(), edge.kind())) {
            on_issue(Issue::DuplicateEdge {
                position,
                edge: label(),
                source: edge.source().to_string(),
                target: edge.target().to_string(),
                kind: edge.kind(),
            });
            continue;
        }

        usable.push(edge);
    }

    usable
}
