//! On-disk vector index for the cora course advisor
//!
//! This crate owns the binary artifact format produced by the offline index
//! build and the read-only [`CourseIndex`] loaded from it at service start.

mod artifact;
mod index;

pub use artifact::{write_artifact, FORMAT_VERSION};
pub use index::{CourseIndex, ScoredHit};

// Re-export core types for convenience
pub use cora_core::{CourseRecord, Error, Result};
