//! Directed peer nominations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Nomination type. Anything else on the wire fails deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Positive nomination ("I would pick this person").
    Choice,
    /// Negative nomination ("I would avoid this person").
    Rejection,
}

impl EdgeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Choice => "choice",
            Self::Rejection => "rejection",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read access shared by raw and enriched edges.
pub trait GraphEdge {
    /// Supplied or assigned edge id, if any.
    fn id(&self) -> Option<&str>;
    fn source(&self) -> &str;
    fn target(&self) -> &str;
    fn kind(&self) -> EdgeKind;
    /// Survey question that produced the nomination.
    fn question_id(&self) -> Option<&str>;
    fn weight(&self) -> Option<f64>;

    /// `true` when source and target are the same participant.
    fn is_self_loop(&self) -> bool {
        self.source() == self.target()
    }

    /// Deterministic id `source-target-type`.
    ///
    /// Two edges sharing the same triple collide under this scheme.
    fn derived_id(&self) -> String {
        format!("{}-{}-{}", self.source(), self.target(), self.kind())
    }
}

impl<T: GraphEdge + ?Sized> GraphEdge for &T {
    fn id(&self) -> Option<&str> {
        (**self).id()
    }

    fn source(&self) -> &str {
        (**self).source()
    }

    fn target(&self) -> &str {
        (**self).target()
    }

    fn kind(&self) -> EdgeKind {
        (**self).kind()
    }

    fn question_id(&self) -> Option<&str> {
        (**self).question_id()
    }

    fn weight(&self) -> Option<f64> {
        (**self).weight()
    }
}

/// A nomination as supplied by the survey pipeline.
///
/// A `reciprocal` field on input is ignored; reciprocity is always computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Edge {
    /// Create an edge with no id, question, or weight.
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>, kind: EdgeKind) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
            kind,
            question_id: None,
            weight: None,
        }
    }

    #[must_use]
    pub fn choice(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(source, target, EdgeKind::Choice)
    }

    #[must_use]
    pub fn rejection(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(source, target, EdgeKind::Rejection)
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_question(mut self, question_id: impl Into<String>) -> Self {
        self.question_id = Some(question_id.into());
        self
    }

    #[must_use]
    pub const fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

impl GraphEdge for Edge {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn target(&self) -> &str {
        &self.target
    }

    fn kind(&self) -> EdgeKind {
        self.kind
    }

    fn question_id(&self) -> Option<&str> {
        self.question_id.as_deref()
    }

    fn weight(&self) -> Option<f64> {
        self.weight
    }
}

/// A nomination after normalization: id assigned, reciprocity flagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    pub reciprocal: bool,
}

impl GraphEdge for EnrichedEdge {
    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn target(&self) -> &str {
        &self.target
    }

    fn kind(&self) -> EdgeKind {
        self.kind
    }

    fn question_id(&self) -> Option<&str> {
        self.question_id.as_deref()
    }

    fn weight(&self) -> Option<f64> {
        self.weight
    }
}
