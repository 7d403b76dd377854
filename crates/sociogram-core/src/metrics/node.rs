//! Per-participant nomination counts, indices, and status classification.
//!
//! # Indices
//!
//! ```text
//! popularity = choices_received    / (n - 1)
//! antipathy  = rejections_received / (n - 1)
//! ```
//!
//! Both are 0 when `n <= 1` and are rounded to two decimals.
//!
//! # Status
//!
//! Status comes from an ordered rule table ([`StatusRules`]); the first rule
//! whose criteria all hold wins, otherwise the node is `normal`. With the
//! default thresholds the table reads:
//!
//! | order | status     | criteria                                  |
//! |-------|------------|-------------------------------------------|
//! | 1     | `leader`   | popularity > 0.5 and no rejections        |
//! | 2     | `popular`  | popularity > 0.3                          |
//! | 3     | `isolated` | no choices received and no rejections     |
//! | 4     | `rejected` | antipathy > 0.3                           |
//! | -     | `normal`   | fallback                                  |
//!
//! Criteria are evaluated against the rounded indices, so a status never
//! disagrees with the numbers published next to it.

use crate::config::StatusThresholds;
use crate::metrics::round2;
use crate::model::{EdgeKind, GraphEdge, NodeMetrics, Status};

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// One condition in a status rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Criterion {
    PopularityAbove(f64),
    AntipathyAbove(f64),
    NoChoicesReceived,
    NoRejectionsReceived,
}

impl Criterion {
    /// Whether this criterion holds for `metrics`.
    #[must_use]
    pub fn holds(self, metrics: &NominationProfile) -> bool {
        match self {
            Self::PopularityAbove(t) => metrics.popularity > t,
            Self::AntipathyAbove(t) => metrics.antipathy > t,
            Self::NoChoicesReceived => metrics.choices_received == 0,
            Self::NoRejectionsReceived => metrics.rejections_received == 0,
        }
    }
}

/// A status assigned when every criterion holds.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusRule {
    pub status: Status,
    pub criteria: Vec<Criterion>,
}

impl StatusRule {
    #[must_use]
    pub fn matches(&self, profile: &NominationProfile) -> bool {
        self.criteria.iter().all(|c| c.holds(profile))
    }
}

/// Ordered decision list. First match wins; [`StatusRules::fallback`] otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusRules {
    rules: Vec<StatusRule>,
    fallback: Status,
}

impl StatusRules {
    /// Build the standard five-way table from `thresholds`.
    #[must_use]
    pub fn from_thresholds(thresholds: &StatusThresholds) -> Self {
        use Criterion::{AntipathyAbove, NoChoicesReceived, NoRejectionsReceived, PopularityAbove};

        let rules = vec![
            StatusRule {
                status: Status::Leader,
                criteria: vec![
                    PopularityAbove(thresholds.leader_popularity),
                    NoRejectionsReceived,
                ],
            },
            StatusRule {
                status: Status::Popular,
                criteria: vec![PopularityAbove(thresholds.popular_popularity)],
            },
            StatusRule {
                status: Status::Isolated,
                criteria: vec![NoChoicesReceived, NoRejectionsReceived],
            },
            StatusRule {
                status: Status::Rejected,
                criteria: vec![AntipathyAbove(thresholds.rejected_antipathy)],
            },
        ];

        Self {
            rules,
            fallback: Status::Normal,
        }
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[StatusRule] {
        &self.rules
    }

    #[must_use]
    pub const fn fallback(&self) -> Status {
        self.fallback
    }

    /// Classify a nomination profile.
    #[must_use]
    pub fn classify(&self, profile: &NominationProfile) -> Status {
        self.rules
            .iter()
            .find(|rule| rule.matches(profile))
            .map_or(self.fallback, |rule| rule.status)
    }
}

impl Default for StatusRules {
    fn default() -> Self {
        Self::from_thresholds(&StatusThresholds::default())
    }
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Counts and rounded indices for one node, before classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NominationProfile {
    pub choices_received: usize,
    pub choices_given: usize,
    pub rejections_received: usize,
    pub rejections_given: usize,
    pub popularity: f64,
    pub antipathy: f64,
}

impl NominationProfile {
    /// Tally the nominations touching `node_id` in `edges`.
    #[must_use]
    pub fn tally<E: GraphEdge>(node_id: &str, edges: &[E], total_node_count: usize) -> Self {
        let mut choices_received = 0;
        let mut choices_given = 0;
        let mut rejections_received = 0;
        let mut rejections_given = 0;

        for edge in edges {
            let received = edge.target() == node_id;
            let given = edge.source() == node_id;
            match edge.kind() {
                EdgeKind::Choice => {
                    choices_received += usize::from(received);
                    choices_given += usize::from(given);
                }
                EdgeKind::Rejection => {
                    rejections_received += usize::from(received);
                    rejections_given += usize::from(given);
                }
            }
        }

        Self {
            choices_received,
            choices_given,
            rejections_received,
            rejections_given,
            popularity: index(choices_received, total_node_count),
            antipathy: index(rejections_received, total_node_count),
        }
    }

    fn into_metrics(self, status: Status) -> NodeMetrics {
        NodeMetrics {
            choices_received: self.choices_received,
            choices_given: self.choices_given,
            rejections_received: self.rejections_received,
            rejections_given: self.rejections_given,
            popularity: self.popularity,
            antipathy: self.antipathy,
            status,
        }
    }
}

/// Compute metrics for `node_id` with the default status thresholds.
///
/// `edges` should already be restricted to usable nominations; see
/// [`crate::graph::sanitize::usable_edges`].
#[must_use]
pub fn compute_node_metrics<E: GraphEdge>(
    node_id: &str,
    edges: &[E],
    total_node_count: usize,
) -> NodeMetrics {
    compute_node_metrics_with(node_id, edges, total_node_count, &StatusRules::default())
}

/// Compute metrics for `node_id` classifying with an explicit rule table.
#[must_use]
pub fn compute_node_metrics_with<E: GraphEdge>(
    node_id: &str,
    edges: &[E],
    total_node_count: usize,
    rules: &StatusRules,
) -> NodeMetrics {
    let profile = NominationProfile::tally(node_id, edges, total_node_count);
    let status = rules.classify(&profile);
    profile.into_metrics(status)
}

#[allow(clippy::cast_precision_loss)]
fn index(count: usize, total_node_count: usize) -> f64 {
    if total_node_count <= 1 {
        return 0.0;
    }
    round2(count as f64 / (total_node_count - 1) as f64)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Edge;

    fn profile(choices_received: usize, rejections_received: usize, n: usize) -> NominationProfile {
        NominationProfile {
            choices_received,
            choices_given: 0,
            rejections_received,
            rejections_given: 0,
            popularity: index(choices_received, n),
            antipathy: index(rejections_received, n),
        }
    }

    #[test]
    fn counts_split_by_direction_and_kind() {
        let edges = vec![
            Edge::choice("a", "b"),
            Edge::choice("c", "b"),
            Edge::choice("b", "a"),
            Edge::rejection("d", "b"),
            Edge::rejection("b", "d"),
            Edge::rejection("b", "c"),
        ];
        let m = compute_node_metrics("b", &edges, 4);
        assert_eq!(m.choices_received, 2);
        assert_eq!(m.choices_given, 1);
        assert_eq!(m.rejections_received, 1);
        assert_eq!(m.rejections_given, 2);
        assert!((m.popularity - 0.67).abs() < 1e-9);
        assert!((m.antipathy - 0.33).abs() < 1e-9);
        assert_eq!(m.status, Status::Popular);
    }

    #[test]
    fn single_node_has_zero_indices() {
        let m = compute_node_metrics::<Edge>("solo", &[], 1);
        assert!(m.popularity.abs() < f64::EPSILON);
        assert!(m.antipathy.abs() < f64::EPSILON);
        assert_eq!(m.status, Status::Isolated);
    }

    #[test]
    fn zero_nodes_does_not_divide() {
        let edges = vec![Edge::choice("x", "y")];
        let m = compute_node_metrics("y", &edges, 0);
        assert_eq!(m.choices_received, 1);
        assert!(m.popularity.abs() < f64::EPSILON);
    }

    #[test]
    fn leader_requires_strictly_more_than_half() {
        let rules = StatusRules::default();
        assert_eq!(rules.classify(&profile(1, 0, 3)), Status::Popular);
        assert_eq!(rules.classify(&profile(2, 0, 3)), Status::Leader);
    }

    #[test]
    fn leader_loses_to_popular_when_rejected() {
        let rules = StatusRules::default();
        assert_eq!(rules.classify(&profile(3, 1, 4)), Status::Popular);
    }

    #[test]
    fn popular_beats_rejected() {
        // popularity 0.5 and antipathy 0.5: popular is evaluated first.
        let rules = StatusRules::default();
        assert_eq!(rules.classify(&profile(2, 2, 5)), Status::Popular);
    }

    #[test]
    fn rejected_and_normal() {
        let rules = StatusRules::default();
        // 10 nodes: 4 rejections -> antipathy 0.44
        assert_eq!(rules.classify(&profile(1, 4, 10)), Status::Rejected);
        // 10 nodes: 1 choice, 1 rejection -> normal
        assert_eq!(rules.classify(&profile(1, 1, 10)), Status::Normal);
        // Only rejections but under the threshold: not isolated, not rejected.
        assert_eq!(rules.classify(&profile(0, 2, 10)), Status::Normal);
    }

    #[test]
    fn classification_uses_rounded_indices() {
        // 3 / 10 = 0.3 exactly: not strictly above 0.3.
        let rules = StatusRules::default();
        assert_eq!(rules.classify(&profile(3, 0, 11)), Status::Normal);
    }

    #[test]
    fn custom_thresholds_change_table() {
        let rules = StatusRules::from_thresholds(&StatusThresholds {
            leader_popularity: 0.8,
            popular_popularity: 0.1,
            rejected_antipathy: 0.05,
        });
        assert_eq!(rules.rules().len(), 4);
        assert_eq!(rules.fallback(), Status::Normal);
        assert_eq!(rules.classify(&profile(1, 0, 3)), Status::Popular);
        assert_eq!(rules.classify(&profile(2, 0, 3)), Status::Leader);
        assert_eq!(rules.classify(&profile(0, 1, 11)), Status::Rejected);
    }

    #[test]
    fn rule_order_is_leader_popular_isolated_rejected() {
        let order: Vec<Status> = StatusRules::default()
            .rules()
            .iter()
            .map(|r| r.status)
            .collect();
        assert_eq!(
            order,
            vec![Status::Leader, Status::Popular, Status::Isolated, Status::Rejected]
        );
    }
}
