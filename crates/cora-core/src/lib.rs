//! Core traits and types for cora (Course Retrieval Advisor)
//!
//! This crate defines the fundamental traits and types used across the cora
//! system. It provides capability-facing interfaces for embedding providers,
//! live data fetchers and answer synthesizers, making the query-resolution
//! pipeline test-friendly and extensible.

pub mod bundle;
pub mod embedding;
pub mod error;
pub mod fetch;
pub mod model;
pub mod options;
pub mod synthesis;

pub use bundle::{FreshnessSummary, QueryContextBundle, RankedCourse};
pub use embedding::EmbeddingProvider;
pub use error::{Error, Result};
pub use fetch::LiveFetcher;
pub use model::{CourseRecord, Fee, Freshness, LiveUpdate, VolatileField, VolatileFields};
pub use options::ResolverOptions;
pub use synthesis::AnswerSynthesizer;
