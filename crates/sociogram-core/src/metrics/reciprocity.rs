//! Mutual-nomination detection.
//!
//! Two participants reciprocate when each nominates the other with the same
//! nomination type. A self-loop is never reciprocal: its only mirror is
//! itself.
//!
//! [`is_reciprocal`] and [`reciprocity_ratio`] are the direct pairwise scans
//! (O(E²)), fine for a classroom. [`ReciprocityIndex`] answers the same
//! questions from a hash set keyed by `(source, target, type)` in O(E) and is
//! what the normalizer and aggregator use.

use std::collections::HashSet;

use crate::metrics::ratio;
use crate::model::{EdgeKind, GraphEdge};

/// `true` iff `all_edges` holds a nomination of the same type going the
/// other way (`target -> source`).
#[must_use]
pub fn is_reciprocal<E: GraphEdge, F: GraphEdge>(edge: &E, all_edges: &[F]) -> bool {
    if edge.is_self_loop() {
        return false;
    }
    all_edges.iter().any(|other| {
        other.kind() == edge.kind()
            && other.source() == edge.target()
            && other.target() == edge.source()
    })
}

/// Fraction of `edges` for which [`is_reciprocal`] holds within `edges`.
///
/// Intended for a single-type subset. Returns 0 for an empty slice. Not
/// rounded.
#[must_use]
pub fn reciprocity_ratio<E: GraphEdge>(edges: &[E]) -> f64 {
    let mutual = edges.iter().filter(|e| is_reciprocal(*e, edges)).count();
    ratio(mutual, edges.len())
}

/// Hash index over nomination triples for O(1) mirror lookups.
#[derive(Debug, Clone, Default)]
pub struct ReciprocityIndex<'a> {
    triples: HashSet<(&'a str, &'a str, EdgeKind)>,
}

impl<'a> ReciprocityIndex<'a> {
    /// Index every edge in `edges`.
    #[must_use]
    pub fn build<E: GraphEdge>(edges: &'a [E]) -> Self {
        let triples = edges
            .iter()
            .map(|e| (e.source(), e.target(), e.kind()))
            .collect();
        Self { triples }
    }

    /// Same answer as [`is_reciprocal`] against the indexed edge set.
    #[must_use]
    pub fn contains_mirror<E: GraphEdge>(&self, edge: &E) -> bool {
        !edge.is_self_loop()
            && self
                .triples
                .contains(&(edge.target(), edge.source(), edge.kind()))
    }

    /// Fraction of `edges` whose mirror is indexed. 0 for an empty slice.
    #[must_use]
    pub fn ratio<E: GraphEdge>(&self, edges: &[E]) -> f64 {
        let mutual = edges.iter().filter(|e| self.contains_mirror(*e)).count();
        ratio(mutual, edges.len())
    }

    /// Number of indexed triples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}
