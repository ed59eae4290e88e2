//! Image catalog client
//!
//! Issues keyword searches against a Pixabay-compatible catalog and
//! normalizes hits into [`PhotoResult`] records. One attempt per call, no
//! retries, no caching; the session layer turns failures into user-facing
//! notifications.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::config::ProviderConfig;
use crate::domain::PhotoResult;
use crate::error::{Error, Result};

/// Request timeout for catalog calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Seam between the session and the remote catalog
///
/// Production uses [`PixabayClient`]; tests substitute a stub.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Search the catalog by keyword
    ///
    /// Returns at most the configured page size of results. A blank query
    /// fails with [`Error::EmptyQuery`] before any request is issued.
    async fn search(&self, query: &str) -> Result<Vec<PhotoResult>>;

    /// Fetch raw image bytes (used for the full-resolution background)
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>>;
}

/// HTTP client for the Pixabay search API
pub struct PixabayClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

/// Raw search response body
#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Vec<Hit>,
}

/// One raw catalog hit
#[derive(Debug, Deserialize)]
struct Hit {
    id: u64,
    #[serde(rename = "largeImageURL")]
    large_image_url: String,
    #[serde(rename = "webformatURL")]
    webformat_url: String,
    #[serde(default)]
    tags: String,
}

impl From<Hit> for PhotoResult {
    fn from(hit: Hit) -> Self {
        PhotoResult {
            id: hit.id.to_string(),
            full_url: hit.large_image_url,
            thumb_url: hit.webformat_url,
            description: hit.tags,
        }
    }
}

impl PixabayClient {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, config })
    }

    /// Query parameters for a search request
    fn build_query(&self, query: &str) -> [(&'static str, String); 5] {
        [
            ("key", self.config.api_key.clone()),
            ("q", query.to_string()),
            ("per_page", self.config.per_page.to_string()),
            ("image_type", "photo".to_string()),
            ("safesearch", "true".to_string()),
        ]
    }
}

/// Parse a search response body into normalized photo records, capped at
/// `per_page` entries
fn parse_search_response(body: &[u8], per_page: u32) -> Result<Vec<PhotoResult>> {
    let response: SearchResponse = serde_json::from_slice(body)?;
    Ok(response
        .hits
        .into_iter()
        .take(per_page as usize)
        .map(PhotoResult::from)
        .collect())
}

#[async_trait]
impl ImageProvider for PixabayClient {
    async fn search(&self, query: &str) -> Result<Vec<PhotoResult>> {
        if query.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }

        log::debug!("Searching catalog for {query:?}");
        let response = self
            .http
            .get(&self.config.endpoint)
            .query(&self.build_query(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Catalog search for {query:?} failed with status {status}");
            return Err(Error::Status(status));
        }

        let body = response.bytes().await?;
        let results = parse_search_response(&body, self.config.per_page)?;
        log::debug!("Catalog returned {} results for {query:?}", results.len());
        Ok(results)
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("Fetching image {url}");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }
        Ok(response.bytes().await?.to_vec())
    }
}
