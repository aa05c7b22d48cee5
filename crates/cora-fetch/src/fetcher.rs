//! HTTP page fetcher implementing the LiveFetcher boundary

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use cora_core::{CourseRecord, Error, LiveFetcher, LiveUpdate, Result};

use crate::extract::extract_update;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches volatile fields from programme pages.
///
/// The course-id → page-URL route table is built from the loaded catalog at
/// composition time and immutable afterwards, like everything else shared
/// across requests.
pub struct PageFetcher {
    client: Client,
    routes: HashMap<String, Url>,
}

impl PageFetcher {
    pub fn new(routes: HashMap<String, Url>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Configuration(format!("http client: {e}")))?;
        Ok(Self { client, routes })
    }

    /// Build the route table from catalog records. Records without a page
    /// URL, or with one that does not parse, simply have no live source and
    /// will resolve as `FetchUnavailable`.
    pub fn from_catalog(records: &[CourseRecord]) -> Result<Self> {
        let mut routes = HashMap::new();
        for record in records {
            let Some(raw) = &record.url else { continue };
            match Url::parse(raw) {
                Ok(url) => {
                    routes.insert(record.id.clone(), url);
                }
                Err(error) => {
                    warn!(course = %record.id, %error, "ignoring unparseable programme url");
                }
            }
        }
        Self::new(routes)
    }

    /// Number of courses with a registered live source.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }
}

#[async_trait]
impl LiveFetcher for PageFetcher {
    async fn fetch_volatile_fields(&self, course_id: &str) -> Result<LiveUpdate> {
        let url = self.routes.get(course_id).ok_or_else(|| {
            Error::FetchUnavailable(format!("no live source registered for course {course_id}"))
        })?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        if !response.status().is_success() {
            return Err(Error::FetchUnavailable(format!(
                "{url} answered {}",
                response.status()
            )));
        }

        let html = response.text().await.map_err(map_reqwest_error)?;
        let update = extract_update(&html);
        debug!(
            course = %course_id,
            fee = update.fee.is_some(),
            intake = update.next_intake.is_some(),
            requirements = update.entry_requirements.is_some(),
            "live fields extracted"
        );
        Ok(update)
    }
}

fn map_reqwest_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::FetchTimeout(error.to_string())
    } else {
        Error::FetchUnavailable(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, url: Option<&str>) -> CourseRecord {
        CourseRecord {
            id: id.to_string(),
            title: id.to_string(),
            url: url.map(str::to_string),
            description: String::new(),
            duration: None,
            delivery_mode: None,
            category: None,
            volatile: Default::default(),
        }
    }

    #[test]
    fn route_table_skips_missing_and_invalid_urls() {
        let fetcher = PageFetcher::from_catalog(&[
            record("sd-da", Some("https://academy.example.edu/courses/sd-da")),
            record("sd-bim", None),
            record("sd-cm", Some("definitely not a url")),
        ])
        .unwrap();

        assert_eq!(fetcher.route_count(), 1);
    }

    #[tokio::test]
    async fn unknown_course_is_fetch_unavailable() {
        let fetcher = PageFetcher::new(HashMap::new()).unwrap();
        let err = fetcher.fetch_volatile_fields("sd-missing").await.unwrap_err();
        assert!(matches!(err, Error::FetchUnavailable(_)), "got {err:?}");
    }
}
