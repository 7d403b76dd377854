//! Graph-level pipeline: ingestion checks, normalization, content hashing.
//!
//! # Overview
//!
//! ```text
//! InputGraph / RawGraph (from the survey pipeline)
//!        ↓  sanitize::diagnose()        structural issues, nothing dropped yet
//!        ↓  sanitize::usable_edges()    unknown ids, self-loops, duplicates removed
//!        ↓  normalize::normalize()      metrics attached, ids + reciprocity on edges
//! EnrichedGraph
//!        ↓  metrics::global::aggregate()
//! GlobalMetrics
//! ```
//!
//! ## Cache Invalidation
//!
//! [`content_hash`] is a BLAKE3 hash of the input graph. Every step above is
//! pure, so callers can memoize [`crate::Analysis`] against it; any change to
//! nodes or edges changes the hash.

pub mod hash;
pub mod normalize;
pub mod sanitize;

pub use hash::content_hash;
pub use normalize::{normalize, normalize_with};
pub use sanitize::{GraphDiagnostics, Issue, diagnose, usable_edges};
