//! Query resolution engine for the cora course advisor
//!
//! This crate turns a user question into a ranked [`QueryContextBundle`]:
//! embed the question, search the course index, drop weak candidates,
//! refresh volatile fields from the live source, and assemble the ordered
//! context handed to answer synthesis.

mod advisor;
mod resolver;


pub use advisor::{Advisor, AdvisorReply, NO_MATCH_MESSAGE};
pub use resolver::QueryResolver;

// Re-export core types for convenience
pub use cora_core::{
    AnswerSynthesizer, EmbeddingProvider, Error, LiveFetcher, QueryContextBundle, RankedCourse,
    ResolverOptions, Result,
};
pub use cora_index::CourseIndex;
