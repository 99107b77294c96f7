//! Robots.txt handling module
//!
//! This module provides fetching, parsing, and per-host caching of robots.txt
//! files, and the [`CrawlPolicy`] seam the crawl engine checks before every
//! page fetch.

mod cache;
mod parser;
mod source;

pub use cache::{rules_for_response, RobotsCache};
pub use parser::ParsedRobots;
pub use source::{HttpRobotsSource, RobotsResponse, RobotsSource};

use async_trait::async_trait;
use url::Url;

/// Decides whether a URL may be fetched
///
/// Implementations must be safe to call from many workers at once and must
/// never fail: an undecidable URL is simply not allowed.
#[async_trait]
pub trait CrawlPolicy: Send + Sync {
    /// Returns `true` if the crawler may fetch `url`
    async fn is_allowed(&self, url: &Url) -> bool;
}

/// A policy that allows every URL
///
/// Used for crawls that deliberately ignore robots.txt, such as tests of the
/// crawl engine in isolation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl CrawlPolicy for AllowAll {
    async fn is_allowed(&self, _url: &Url) -> bool {
        true
    }
}
