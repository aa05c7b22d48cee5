//! Error types for the cora course advisor

use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the cora query-resolution pipeline.
///
/// Boot-time errors (`Configuration`, `CorruptIndex`, `IndexMetadataMismatch`)
/// are fatal: the service must not accept questions after one of them.
/// `EmbeddingUnavailable` and `Synthesis` surface to the caller per request;
/// `FetchTimeout` and `FetchUnavailable` are always absorbed by the resolver
/// with a freshness downgrade and never reach the end user.
#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("corrupt index artifact: {0}")]
    CorruptIndex(String),

    #[error("index holds {vectors} vectors but metadata holds {records} records")]
    IndexMetadataMismatch { vectors: usize, records: usize },

    #[error("embedding provider unavailable: {0}")]
    EmbeddingUnavailable(String),

    #[error("live fetch timed out: {0}")]
    FetchTimeout(String),

    #[error("live fetch unavailable: {0}")]
    FetchUnavailable(String),

    #[error("answer synthesis failed: {0}")]
    Synthesis(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the two live-fetch failure kinds the resolver recovers from
    /// locally by falling back to static data.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Error::FetchTimeout(_) | Error::FetchUnavailable(_))
    }
}
