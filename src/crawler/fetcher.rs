//! HTTP page fetcher
//!
//! This module turns a URL into the list of links on that page:
//! - Building the HTTP client with the crawler's user agent
//! - GET requests with response classification
//! - Handing HTML bodies to the link parser
//!
//! Every failure degrades to "no links"; nothing here is retried.

use crate::crawler::parser::extract_links;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Source of outbound links for a page
///
/// The crawl engine treats implementations as black boxes. They must never
/// fail: any network, protocol, or parse problem yields an empty list.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Returns the link strings found on the page at `url`
    async fn fetch_links(&self, url: &Url) -> Vec<String>;
}

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched a parseable page
    Success {
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Page is neither text nor XML
    ContentMismatch {
        /// The actual Content-Type received
        content_type: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, body read...)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client shared by page and robots.txt fetches
///
/// # Arguments
///
/// * `user_agent` - Full `User-Agent` header value, e.g. `ConcurrentCrawler/1.0`
/// * `timeout` - Per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use sumi_crawl::crawler::build_http_client;
///
/// let client = build_http_client("ConcurrentCrawler/1.0", Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the response
///
/// # Response Handling
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx with text/XML content | Success |
/// | 2xx with other content | ContentMismatch |
/// | Any other status | HttpError |
/// | Transport or body failure | NetworkError |
pub async fn fetch_page(client: &Client, url: &Url) -> FetchResult {
    let response = match client.get(url.as_str()).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_parseable_content_type(&content_type) {
        return FetchResult::ContentMismatch { content_type };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}

/// Accepts `text/*`, XML types, and responses without a Content-Type
fn is_parseable_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    mime.is_empty()
        || mime.starts_with("text/")
        || mime == "application/xml"
        || (mime.starts_with("application/") && mime.ends_with("+xml"))
}

/// [`PageFetcher`] that downloads pages over HTTP and extracts `a[href]` links
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    /// Creates a fetcher using the given client
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_links(&self, url: &Url) -> Vec<String> {
        match fetch_page(&self.client, url).await {
            FetchResult::Success { body, .. } => extract_links(&body, url),
            FetchResult::ContentMismatch { content_type } => {
                tracing::debug!("Skipping {}: unsupported content type {}", url, content_type);
                Vec::new()
            }
            FetchResult::HttpError { status_code } => {
                tracing::debug!("Skipping {}: HTTP {}", url, status_code);
                Vec::new()
            }
            FetchResult::NetworkError { error } => {
                tracing::debug!("Skipping {}: {}", url, error);
                Vec::new()
            }
        }
    }
}
