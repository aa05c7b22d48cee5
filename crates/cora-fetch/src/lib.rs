//! Live data fetcher for the cora course advisor
//!
//! Implements the [`cora_core::LiveFetcher`] boundary over HTTP: fetch the
//! programme page for a course and extract whatever volatile fields (fee,
//! next intake, entry requirements) it currently advertises.

mod extract;
mod fetcher;

pub use fetcher::PageFetcher;

// Re-export core types for convenience
pub use cora_core::{Error, LiveFetcher, LiveUpdate, Result};
