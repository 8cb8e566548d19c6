//! Retrieval of a single feed document.
//!
//! The network call sits behind the [`FetchDocument`] trait so the rest of
//! the pipeline can be driven by an in-memory fetcher in tests. [`HttpFetcher`]
//! is the production implementation on top of `reqwest`.
//!
//! [`fetch_feed`] is the failure boundary: whatever goes wrong for one source
//! (transport error, timeout, error status, empty body, unreadable XML) is
//! logged and turned into an empty item list. Nothing is retried.

use std::time::{Duration, Instant};

use reqwest::Client;
use tokio::time::timeout;
use tracing::{info, instrument, warn};
use url::Url;

use crate::error::FeedError;
use crate::feeds::extractor::extract_items;
use crate::models::{ExtractedItem, FeedSource};

/// Default per-source deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Something that can retrieve the raw bytes of a feed document.
pub trait FetchDocument {
    /// Fetch the document at `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns a [`FeedError`] when the document could not be retrieved.
    async fn fetch_document(&self, endpoint: &Url) -> Result<Vec<u8>, FeedError>;
}

/// Fetches feed documents over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher whose requests give up after `request_timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the HTTP client cannot be constructed.
    pub fn new(request_timeout: Duration) -> Result<Self, FeedError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(request_timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl FetchDocument for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%endpoint))]
    async fn fetch_document(&self, endpoint: &Url) -> Result<Vec<u8>, FeedError> {
        let response = self.client.get(endpoint.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }
        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(FeedError::EmptyBody);
        }
        Ok(body.to_vec())
    }
}

/// Fetch one source and extract its items.
///
/// The fetch must finish within `deadline`. On any failure the source
/// contributes an empty vector; the error is only logged.
#[instrument(level = "info", skip_all, fields(source = %source.tag, endpoint = %source.endpoint))]
pub async fn fetch_feed<F>(fetcher: &F, source: &FeedSource, deadline: Duration) -> Vec<ExtractedItem>
where
    F: FetchDocument,
{
    let t0 = Instant::now();
    let result = match timeout(deadline, fetcher.fetch_document(&source.endpoint)).await {
        Ok(result) => result,
        Err(_) => Err(FeedError::Timeout(deadline)),
    };

    match result {
        Ok(document) => {
            let items = extract_items(&document, source.tag);
            info!(
                count = items.len(),
                bytes = document.len(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "Fetched feed"
            );
            items
        }
        Err(e) => {
            warn!(
                error = %e,
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "Feed fetch failed; source contributes no items"
            );
            Vec::new()
        }
    }
}
