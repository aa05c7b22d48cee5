//! Live data fetcher trait

use async_trait::async_trait;

use crate::model::LiveUpdate;
use crate::Result;

/// Trait for live data fetchers.
///
/// Given a course identifier, attempt to retrieve current volatile fields
/// (fee, next intake, entry requirements) from an external source. Both
/// failure kinds, [`crate::Error::FetchTimeout`] and
/// [`crate::Error::FetchUnavailable`], are treated identically by the
/// resolver: fall back to static data, never propagate to the end user.
#[async_trait]
pub trait LiveFetcher: Send + Sync {
    /// Fetch whatever volatile fields the live source currently advertises.
    async fn fetch_volatile_fields(&self, course_id: &str) -> Result<LiveUpdate>;
}
