//! Content hashing for memoization.
//!
//! Normalization and aggregation are pure, so their output can be cached
//! against a hash of their input. [`content_hash`] covers everything that can
//! change the output: node ids, labels, attributes and any pre-attached
//! metrics, plus every edge field. Nodes are hashed sorted by id, so the
//! order of distinct participants is irrelevant; among repeated ids, and
//! across edges, input order is kept because it decides which record
//! survives.

use crate::model::{Graph, GraphEdge, GraphNode, NodeMetrics};

/// BLAKE3 hash of a graph's content, rendered as `blake3:<hex>`.
#[must_use]
pub fn content_hash<N: GraphNode, E: GraphEdge>(graph: &Graph<N, E>) -> String {
    let mut hasher = blake3::Hasher::new();

    let mut nodes: Vec<&N> = graph.nodes.iter().collect();
    // Stable: duplicate ids keep input order, which decides the survivor.
    nodes.sort_by(|a, b| a.id().cmp(b.id()));

    hasher.update(b"nodes\x00");
    for node in nodes {
        field(&mut hasher, node.id());
        field(&mut hasher, node.label());
        for (key, value) in node.attributes() {
            field(&mut hasher, key);
            field(&mut hasher, value);
        }
        match node.metrics() {
            Some(metrics) => hash_metrics(&mut hasher, metrics),
            None => {
                hasher.update(b"-");
            }
        }
        hasher.update(b"\n");
    }

    hasher.update(b"edges\x00");
    for edge in &graph.edges {
        field(&mut hasher, edge.id().unwrap_or_default());
        field(&mut hasher, edge.source());
        field(&mut hasher, edge.target());
        field(&mut hasher, edge.kind().as_str());
        field(&mut hasher, edge.question_id().unwrap_or_default());
        hasher.update(&edge.weight().map_or(u64::MAX, f64::to_bits).to_le_bytes());
        hasher.update(b"\n");
    }

    format!("blake3:{}", hasher.finalize().to_hex())
}

fn field(hasher: &mut blake3::Hasher, value: &str) {
    hasher.update(value.as_bytes());
    hasher.update(b"\x00");
}

fn hash_metrics(hasher: &mut blake3::Hasher, m: &NodeMetrics) {
    for count in [
        m.choices_received,
        m.choices_given,
        m.rejections_received,
        m.rejections_given,
    ] {
        hasher.update(&(count as u64).to_le_bytes());
    }
    hasher.update(&m.popularity.to_bits().to_le_bytes());
    hasher.update(&m.antipathy.to_bits().to_le_bytes());
    field(hasher, m.status.as_str());
}
