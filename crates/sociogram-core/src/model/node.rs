//! Participants in a sociogram.
//!
//! A node exists in two stages. [`RawNode`] is what an upstream collaborator
//! builds from survey data; it carries no metrics. [`EnrichedNode`] is what
//! [`crate::graph::normalize`] hands back, with [`NodeMetrics`] always present.
//! Normalization is the only path from one to the other.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Demographic attributes attached to a participant (e.g. `gender`, `age`).
///
/// Opaque to the engine; carried through normalization unchanged.
pub type Attributes = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Sociometric status bucket. Exactly one per node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Leader,
    Popular,
    Normal,
    Isolated,
    Rejected,
}

impl Status {
    /// Every bucket, in reporting order.
    pub const ALL: [Self; 5] = [
        Self::Leader,
        Self::Popular,
        Self::Normal,
        Self::Isolated,
        Self::Rejected,
    ];

    /// Wire name of the bucket.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Leader => "leader",
            Self::Popular => "popular",
            Self::Normal => "normal",
            Self::Isolated => "isolated",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// NodeMetrics
// ---------------------------------------------------------------------------

/// Per-participant nomination profile.
///
/// `popularity` and `antipathy` are in `[0, 1]`, rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMetrics {
    pub choices_received: usize,
    pub choices_given: usize,
    pub rejections_received: usize,
    pub rejections_given: usize,
    pub popularity: f64,
    pub antipathy: f64,
    pub status: Status,
}

// ---------------------------------------------------------------------------
// Node stages
// ---------------------------------------------------------------------------

/// Read access shared by every node stage.
pub trait GraphNode {
    /// Unique participant id.
    fn id(&self) -> &str;
    /// Display label.
    fn label(&self) -> &str;
    /// Demographic attributes.
    fn attributes(&self) -> &Attributes;
    /// Metrics, when this node has already been enriched.
    fn metrics(&self) -> Option<&NodeMetrics>;
}

/// A participant as supplied by the survey pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
}

impl RawNode {
    /// Create a node with no attributes.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            attributes: Attributes::new(),
        }
    }

    /// Attach one demographic attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// A participant carrying computed (or preserved) metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedNode {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
    pub metrics: NodeMetrics,
}

/// Node as it appears in an input file: with or without pre-computed metrics.
///
/// A `metrics` key selects [`NodeRecord::Enriched`]; when present it must be
/// a well-formed [`NodeMetrics`] object, otherwise parsing fails.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeRecord {
    Enriched(EnrichedNode),
    Raw(RawNode),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeWire {
    id: String,
    label: String,
    #[serde(default)]
    attributes: Attributes,
    #[serde(default)]
    metrics: Option<NodeMetrics>,
}

impl<'de> Deserialize<'de> for NodeRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let NodeWire {
            id,
            label,
            attributes,
            metrics,
        } = NodeWire::deserialize(deserializer)?;

        Ok(match metrics {
            Some(metrics) => Self::Enriched(EnrichedNode {
                id,
                label,
                attributes,
                metrics,
            }),
            None => Self::Raw(RawNode {
                id,
                label,
                attributes,
            }),
        })
    }
}

impl GraphNode for RawNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn metrics(&self) -> Option<&NodeMetrics> {
        None
    }
}

impl GraphNode for EnrichedNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn metrics(&self) -> Option<&NodeMetrics> {
        Some(&self.metrics)
    }
}

impl GraphNode for NodeRecord {
    fn id(&self) -> &str {
        match self {
            Self::Enriched(n) => &n.id,
            Self::Raw(n) => &n.id,
        }
    }

    fn label(&self) -> &str {
        match self {
            Self::Enriched(n) => &n.label,
            Self::Raw(n) => &n.label,
        }
    }

    fn attributes(&self) -> &Attributes {
        match self {
            Self::Enriched(n) => &n.attributes,
            Self::Raw(n) => &n.attributes,
        }
    }

    fn metrics(&self) -> Option<&NodeMetrics> {
        match self {
            Self::Enriched(n) => Some(&n.metrics),
            Self::Raw(_) => None,
        }
    }
}

impl From<RawNode> for NodeRecord {
    fn from(node: RawNode) -> Self {
        Self::Raw(node)
    }
}

impl From<EnrichedNode> for NodeRecord {
    fn from(node: EnrichedNode) -> Self {
        Self::Enriched(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_names_are_lowercase() {
        let json = serde_json::to_string(&Status::Isolated).unwrap();
        assert_eq!(json, "\"isolated\"");
        for status in Status::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }

    #[test]
    fn node_record_prefers_enriched_when_metrics_present() {
        let json = r#"{
            "id": "s1", "label": "Ana",
            "metrics": {
                "choicesReceived": 2, "choicesGiven": 1,
                "rejectionsReceived": 0, "rejectionsGiven": 0,
                "popularity": 0.67, "antipathy": 0.0, "status": "popular"
            }
        }"#;
        let record: NodeRecord = serde_json::from_str(json).unwrap();
        assert!(matches!(record, NodeRecord::Enriched(_)));
        assert_eq!(record.metrics().map(|m| m.status), Some(Status::Popular));
    }

    #[test]
    fn node_record_falls_back_to_raw() {
        let json = r#"{ "id": "s2", "label": "Ben", "attributes": { "gender": "m" } }"#;
        let record: NodeRecord = serde_json::from_str(json).unwrap();
        assert!(matches!(record, NodeRecord::Raw(_)));
        assert!(record.metrics().is_none());
        assert_eq!(record.attributes().get("gender").map(String::as_str), Some("m"));
    }

    #[test]
    fn malformed_metrics_are_a_parse_error() {
        let json = r#"{
            "id": "s3", "label": "Cy",
            "metrics": {
                "choicesReceived": 2, "choicesGiven": 1,
                "rejectionsReceived": 0, "rejectionsGiven": 0,
                "popularity": 0.67, "antipathy": 0.0, "status": "superstar"
            }
        }"#;
        assert!(serde_json::from_str::<NodeRecord>(json).is_err());

        let incomplete = r#"{ "id": "s3", "label": "Cy", "metrics": { "status": "leader" } }"#;
        assert!(serde_json::from_str::<NodeRecord>(incomplete).is_err());
    }

    #[test]
    fn null_metrics_read_as_raw() {
        let json = r#"{ "id": "s4", "label": "Di", "metrics": null }"#;
        let record: NodeRecord = serde_json::from_str(json).unwrap();
        assert!(matches!(record, NodeRecord::Raw(_)));
    }

    #[test]
    fn raw_node_builder_sets_attributes() {
        let node = RawNode::new("1", "Carla").with_attribute("age", "11");
        assert_eq!(node.id(), "1");
        assert_eq!(node.label(), "Carla");
        assert_eq!(node.attributes().len(), 1);
    }
}
