//! Embedding provider trait

use async_trait::async_trait;

use crate::Result;

/// Trait for embedding providers (e.g. OpenAI, a local ONNX model).
///
/// The same provider, with the same output dimension, must be used for
/// index construction and query resolution; a dimension mismatch against the
/// loaded index is a fatal configuration error, not a per-request failure.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Convert text into a fixed-length numeric vector.
    ///
    /// Fails with [`crate::Error::EmbeddingUnavailable`] when the provider
    /// cannot be reached; callers surface that as a retryable failure.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// The fixed output dimension of this provider.
    fn dimension(&self) -> usize;
}
