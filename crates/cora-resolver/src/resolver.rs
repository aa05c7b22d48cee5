//! The query resolver: embed, search, refresh, merge, rank

use std::sync::Arc;

use futures::future::join_all;
use tokio::time::timeout;
use tracing::{debug, warn};

use cora_core::{
    bundle::{FreshnessSummary, QueryContextBundle, RankedCourse},
    CourseRecord, EmbeddingProvider, Error, LiveFetcher, ResolverOptions, Result,
};
use cora_index::CourseIndex;

/// Orchestrates one question through the hybrid pipeline.
///
/// Matching runs against static descriptions embedded at index-build time;
/// volatile values (fees, intakes, entry requirements) are refreshed per
/// request. The two are deliberately decoupled: fees change independently of
/// the text used for semantic matching, and re-embedding on every fee change
/// would be wasteful.
pub struct QueryResolver<E: EmbeddingProvider, F: LiveFetcher> {
    index: Arc<CourseIndex>,
    embedder: Arc<E>,
    fetcher: Arc<F>,
    options: ResolverOptions,
}

impl<E: EmbeddingProvider, F: LiveFetcher> QueryResolver<E, F> {
    /// Create a resolver over a loaded index.
    ///
    /// Fails with [`Error::Configuration`] when the embedding provider's
    /// output dimension does not match the index: that mismatch must stop
    /// the service at boot, not fail individual requests.
    pub fn new(
        index: Arc<CourseIndex>,
        embedder: Arc<E>,
        fetcher: Arc<F>,
        options: ResolverOptions,
    ) -> Result<Self> {
        if embedder.dimension() != index.dimension() {
            return Err(Error::Configuration(format!(
                "embedding provider produces dimension {}, index was built with {}",
                embedder.dimension(),
                index.dimension()
            )));
        }
        Ok(Self {
            index,
            embedder,
            fetcher,
            options,
        })
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve a question into a ranked context bundle.
    ///
    /// Returns an empty bundle, never an error, when nothing scores above
    /// the relevance threshold. Live-fetch failures degrade the affected
    /// candidate to stale static values; they never fail the request.
    pub async fn resolve(&self, question: &str) -> Result<QueryContextBundle> {
        let question = question.trim();
        if question.is_empty() {
            return Err(Error::InvalidInput("empty question".to_string()));
        }

        let search_text = self.expand_query(question);
        let query_vector = self.embedder.embed(&search_text).await?;
        if query_vector.len() != self.index.dimension() {
            // Guarded at construction; a provider drifting mid-flight is
            // still a configuration problem, not a retryable one.
            return Err(Error::Configuration(format!(
                "embedding provider returned dimension {}, index expects {}",
                query_vector.len(),
                self.index.dimension()
            )));
        }

        let hits = self.index.search(&query_vector, self.options.top_k)?;
        let retained: Vec<_> = hits
            .into_iter()
            .filter(|hit| hit.score >= self.options.score_threshold)
            .collect();

        if retained.is_empty() {
            debug!(question, "no candidate above relevance threshold");
            return Ok(QueryContextBundle::empty(question));
        }

        // All retained candidates refresh concurrently so total latency is
        // bounded by one fetch round-trip, not K of them.
        let refreshes = retained.iter().filter_map(|hit| {
            let record = self.index.record(hit.ordinal)?.clone();
            Some(self.refresh_candidate(record, hit.score))
        });
        let candidates = join_all(refreshes).await;

        Ok(QueryContextBundle::new(question, candidates))
    }

    /// Refresh one candidate's volatile fields, absorbing fetch failures.
    async fn refresh_candidate(&self, mut record: CourseRecord, score: f32) -> RankedCourse {
        let fetch = self.fetcher.fetch_volatile_fields(&record.id);
        match timeout(self.options.fetch_timeout, fetch).await {
            Ok(Ok(update)) => {
                record.volatile.apply_update(update);
            }
            Ok(Err(error)) => {
                warn!(course = %record.id, %error, "live fetch failed, serving static values");
                record.volatile.mark_all_failed();
            }
            Err(_) => {
                warn!(
                    course = %record.id,
                    timeout_ms = self.options.fetch_timeout.as_millis() as u64,
                    "live fetch timed out, serving static values"
                );
                record.volatile.mark_all_failed();
            }
        }

        let freshness = FreshnessSummary::of(&record);
        RankedCourse {
            course: record,
            score,
            freshness,
        }
    }

    /// Append configured extra search terms when the question contains a
    /// paired needle. Case-insensitive; the original question text is kept
    /// intact in the bundle.
    fn expand_query(&self, question: &str) -> String {
        let lowered = question.to_lowercase();
        let mut expanded = question.to_string();
        for (needle, extra) in &self.options.query_expansions {
            if lowered.contains(&needle.to_lowercase()) {
                expanded.push(' ');
                expanded.push_str(extra);
            }
        }
        expanded
    }
}
