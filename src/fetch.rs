//! Page fetching.
//!
//! Uses reqwest for fetching and hands the body to [`Document::parse`].

use crate::document::Document;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// User-Agent string identifying this client
const USER_AGENT: &str = concat!("wikisum/", env!("CARGO_PKG_VERSION"));

/// Default timeout for HTTP requests
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to fetch {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Something that turns a URL into a parsed document
#[allow(async_fn_in_trait)]
pub trait DocumentProvider {
    async fn fetch(&self, url: &str) -> Result<Document, FetchError>;
}

/// Fetches pages over HTTP. Transport errors, timeouts and non-2xx
/// statuses are all fetch failures.
pub struct HttpProvider {
    client: Client,
}

impl HttpProvider {
    /// Create a provider with the default timeout
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl DocumentProvider for HttpProvider {
    async fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        let request_error = |source: reqwest::Error| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(request_error)?;
        info!(status = %response.status(), "fetched page");

        let html = response.text().await.map_err(request_error)?;
        debug!(bytes = html.len(), "parsing document");

        Ok(Document::parse(&html))
    }
}
