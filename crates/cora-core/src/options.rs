//! Resolver configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for query resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverOptions {
    /// Maximum number of candidates in a bundle. Kept small to bound the
    /// synthesizer's context size.
    pub top_k: usize,
    /// Minimum similarity score for a candidate to be retained.
    pub score_threshold: f32,
    /// Hard per-candidate timeout for live fetches.
    pub fetch_timeout: Duration,
    /// Extra search terms appended to the question when it contains the
    /// paired needle (case-insensitive). Lets operators widen matching for
    /// audience phrasings the catalog descriptions never use.
    pub query_expansions: Vec<(String, String)>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            top_k: 3,
            score_threshold: 0.5,
            fetch_timeout: Duration::from_secs(10),
            query_expansions: Vec::new(),
        }
    }
}
