//! The composed front door: resolve a question, then synthesize an answer

use std::sync::Arc;

use cora_core::{
    AnswerSynthesizer, EmbeddingProvider, LiveFetcher, QueryContextBundle, Result,
};

use crate::resolver::QueryResolver;

/// Message returned when nothing in the catalog is relevant enough.
pub const NO_MATCH_MESSAGE: &str =
    "I couldn't find a relevant programme for that question. Try rephrasing it, \
     or ask about a specific programme from the catalogue.";

/// An answer plus the bundle it was synthesized from, so callers can render
/// the candidate table alongside the prose.
#[derive(Debug, Clone)]
pub struct AdvisorReply {
    pub answer: String,
    pub bundle: QueryContextBundle,
}

/// Couples a [`QueryResolver`] with an [`AnswerSynthesizer`].
pub struct Advisor<E: EmbeddingProvider, F: LiveFetcher, S: AnswerSynthesizer> {
    resolver: QueryResolver<E, F>,
    synthesizer: Arc<S>,
}

impl<E: EmbeddingProvider, F: LiveFetcher, S: AnswerSynthesizer> Advisor<E, F, S> {
    pub fn new(resolver: QueryResolver<E, F>, synthesizer: Arc<S>) -> Self {
        Self {
            resolver,
            synthesizer,
        }
    }

    pub fn resolver(&self) -> &QueryResolver<E, F> {
        &self.resolver
    }

    /// Answer a question end to end.
    ///
    /// An empty bundle short-circuits to [`NO_MATCH_MESSAGE`] without
    /// invoking the synthesizer; synthesis failures propagate to the caller,
    /// which shows a generic failure message.
    pub async fn answer(&self, question: &str) -> Result<AdvisorReply> {
        let bundle = self.resolver.resolve(question).await?;

        if bundle.is_empty() {
            return Ok(AdvisorReply {
                answer: NO_MATCH_MESSAGE.to_string(),
                bundle,
            });
        }

        let answer = self.synthesizer.synthesize(question, &bundle).await?;
        Ok(AdvisorReply { answer, bundle })
    }
}
