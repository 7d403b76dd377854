use std::fmt;

use crate::model::EdgeKind;

/// Machine-readable error codes for dashboards and scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InputParseError,
    UnknownNode,
    SelfLoop,
    DuplicateEdge,
    DuplicateNode,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::InputParseError => "E1002",
            Self::UnknownNode => "E2001",
            Self::SelfLoop => "E2002",
            Self::DuplicateEdge => "E2003",
            Self::DuplicateNode => "E2004",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InputParseError => "Graph input parse error",
            Self::UnknownNode => "Edge references an unknown node",
            Self::SelfLoop => "Edge nominates its own source",
            Self::DuplicateEdge => "Duplicate nomination",
            Self::DuplicateNode => "Duplicate node id",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in sociogram.toml and retry."),
            Self::InputParseError => {
                Some("Check the graph JSON: nodes need id/label, edges need source/target/type.")
            }
            Self::UnknownNode => Some("Add the missing participant or drop the nomination."),
            Self::SelfLoop => Some("Remove nominations where source and target are equal."),
            Self::DuplicateEdge => {
                Some("Merge nominations sharing the same source, target and type.")
            }
            Self::DuplicateNode => Some("Give every participant a unique id."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Structural problems found in an input graph.
///
/// Only raised under the strict edge policy; the lenient policy drops the
/// offending records and reports them through
/// [`crate::graph::sanitize::GraphDiagnostics`] instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("edge {edge} references unknown node {node}")]
    UnknownNode { edge: String, node: String },

    #[error("edge {edge} is a self-loop on node {node}")]
    SelfLoop { edge: String, node: String },

    #[error("duplicate {kind} nomination {source_id} -> {target_id}")]
    DuplicateEdge {
        source_id: String,
        target_id: String,
        kind: EdgeKind,
    },

    #[error("duplicate node id {id}")]
    DuplicateNode { id: String },
}

impl GraphError {
    /// Machine code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownNode { .. } => ErrorCode::UnknownNode,
            Self::SelfLoop { .. } => ErrorCode::SelfLoop,
            Self::DuplicateEdge { .. } => ErrorCode::DuplicateEdge,
            Self::DuplicateNode { .. } => ErrorCode::DuplicateNode,
        }
    }
}
