//! In-memory data model shared by every component.
//!
//! Nodes and edges refer to each other only by id, so every type here
//! serializes as a flat record.

pub mod edge;
pub mod graph;
pub mod node;

pub use edge::{Edge, EdgeKind, EnrichedEdge, GraphEdge};
pub use graph::{EnrichedGraph, Graph, GraphMetadata, InputGraph, RawGraph};
pub use node::{Attributes, EnrichedNode, GraphNode, NodeMetrics, NodeRecord, RawNode, Status};
