//! Answer synthesizer trait

use async_trait::async_trait;

use crate::bundle::QueryContextBundle;
use crate::Result;

/// Trait for answer synthesizers.
///
/// Accepts the finalized context bundle and the original question, returns
/// prose. Prompt construction is entirely the implementor's concern; the
/// resolver's responsibility ends at producing a well-formed, deterministic,
/// minimal bundle.
#[async_trait]
pub trait AnswerSynthesizer: Send + Sync {
    /// Turn a context bundle into a user-facing answer.
    ///
    /// Fails with [`crate::Error::Synthesis`]; callers show a generic
    /// failure message.
    async fn synthesize(&self, question: &str, bundle: &QueryContextBundle) -> Result<String>;
}
