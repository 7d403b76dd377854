//! Sociometric metrics.
//!
//! # Overview
//!
//! - **Node metrics** (`node`): nomination counts, popularity and antipathy
//!   indices, and the status rule table.
//! - **Reciprocity** (`reciprocity`): mutual-nomination detection, pairwise
//!   and indexed.
//! - **Global metrics** (`global`): densities, cohesion, reciprocity ratios,
//!   and the status distribution for a whole group.
//! - **Clusters** (`clusters`): groups of participants joined by mutual
//!   choices.
//!
//! Every function is pure: same input, same output, no I/O.
//!
//! ```rust,ignore
//! use sociogram_core::metrics::{global::aggregate, node::compute_node_metrics};
//!
//! let m = compute_node_metrics("s1", &graph.edges, graph.nodes.len());
//! let g = aggregate(&graph.nodes, &graph.edges);
//! println!("{} cohesion={:.2}", m.status, g.cohesion_index);
//! ```

pub mod clusters;
pub mod global;
pub mod node;
pub mod reciprocity;

/// Round to two decimal places (1% granularity).
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole`, or 0 when `whole` is 0.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_keeps_percent_granularity() {
        assert!((round2(2.0 / 3.0) - 0.67).abs() < 1e-12);
        assert!((round2(1.0 / 3.0) - 0.33).abs() < 1e-12);
        assert!((round2(0.125) - 0.13).abs() < 1e-12);
        assert!((round2(-0.25) - -0.25).abs() < 1e-12);
    }

    #[test]
    fn ratio_guards_zero_denominator() {
        assert!(ratio(3, 0).abs() < f64::EPSILON);
        assert!((ratio(1, 4) - 0.25).abs() < f64::EPSILON);
    }
}
