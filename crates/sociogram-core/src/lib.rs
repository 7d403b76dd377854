#![forbid(unsafe_code)]
//! sociogram-core library.
//!
//! Turns directed peer-nomination edges into per-participant metrics
//! (popularity, antipathy, status) and group metrics (density, cohesion,
//! reciprocity, status distribution).
//!
//! # Conventions
//!
//! - **Errors**: structural input problems are [`GraphError`]; file and
//!   config I/O uses `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`). The
//!   library never installs a subscriber.
//! - **Purity**: every computation is a pure function of its input graph.
//!
//! # Typical Usage
//!
//! ```rust
//! use sociogram_core::model::{Edge, RawGraph, RawNode, Status};
//! use sociogram_core::{aggregate, normalize};
//!
//! let raw = RawGraph::new(
//!     vec![RawNode::new("1", "Ana"), RawNode::new("2", "Ben"), RawNode::new("3", "Cy")],
//!     vec![Edge::choice("1", "2"), Edge::choice("2", "1")],
//! );
//!
//! let enriched = normalize(&raw);
//! assert_eq!(enriched.nodes[2].metrics.status, Status::Isolated);
//!
//! let metrics = aggregate(&enriched.nodes, &enriched.edges);
//! assert_eq!(metrics.choice_reciprocity, 1.0);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod model;

pub use analysis::{Analysis, analyze};
pub use config::{AnalysisConfig, EdgePolicy, MergePolicy, StatusThresholds};
pub use error::{ErrorCode, GraphError};
pub use graph::{content_hash, diagnose, normalize, normalize_with};
pub use metrics::global::{GlobalMetrics, StatusCounts, aggregate, aggregate_with};
pub use metrics::node::{StatusRules, compute_node_metrics, compute_node_metrics_with};
pub use metrics::reciprocity::{ReciprocityIndex, is_reciprocal, reciprocity_ratio};
