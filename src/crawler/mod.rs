//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and link extraction
//! - The concurrent master/worker coordinator
//! - The sequential breadth-first variant
//! - Mode selection and wiring of the HTTP collaborators

mod coordinator;
mod fetcher;
mod parser;
mod sequential;

pub use coordinator::{Batch, Coordinator};
pub use fetcher::{build_http_client, fetch_page, FetchResult, HttpPageFetcher, PageFetcher};
pub use parser::extract_links;
pub use sequential::crawl_sequential;

use crate::config::{validate, Config};
use crate::robots::{CrawlPolicy, HttpRobotsSource, RobotsCache};
use crate::CrawlError;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// How pages are fetched during a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlMode {
    /// Master/worker crawl with many pages in flight
    Concurrent,
    /// One page at a time
    Sequential,
}

impl CrawlMode {
    /// Agent name used when the configuration does not set one
    pub fn default_agent_name(&self) -> &'static str {
        match self {
            Self::Concurrent => "ConcurrentCrawler",
            Self::Sequential => "SequentialCrawler",
        }
    }
}

/// A configured crawler: mode plus collaborators
///
/// The robots policy lives as long as the crawler, so consecutive crawls
/// from the same instance reuse already-fetched robots.txt rules.
pub struct Crawler {
    mode: CrawlMode,
    fetcher: Arc<dyn PageFetcher>,
    policy: Arc<dyn CrawlPolicy>,
    worker_count: usize,
}

impl Crawler {
    /// Creates a crawler from explicit collaborators
    ///
    /// The worker count defaults to the machine's available parallelism.
    pub fn new(mode: CrawlMode, fetcher: Arc<dyn PageFetcher>, policy: Arc<dyn CrawlPolicy>) -> Self {
        Self {
            mode,
            fetcher,
            policy,
            worker_count: default_worker_count(),
        }
    }

    /// Sets the maximum number of concurrent fetches (concurrent mode only)
    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count.max(1);
        self
    }

    /// Builds a crawler backed by HTTP page and robots.txt fetchers
    ///
    /// Both share one reqwest client carrying the configured user agent.
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(CrawlError)` - The HTTP client could not be built
    pub fn from_config(config: &Config, mode: CrawlMode) -> Result<Self, CrawlError> {
        let agent_name = config.user_agent.agent_name(mode);
        let client = build_http_client(
            &config.user_agent.header_value(mode),
            Duration::from_secs(config.crawler.request_timeout_secs),
        )?;

        let fetcher = Arc::new(HttpPageFetcher::new(client.clone()));
        let policy = Arc::new(RobotsCache::new(HttpRobotsSource::new(client), agent_name));

        Ok(Self::new(mode, fetcher, policy).with_worker_count(config.crawler.worker_count))
    }

    /// The crawl mode
    pub fn mode(&self) -> CrawlMode {
        self.mode
    }

    /// Crawls from `seed` and returns up to `limit` discovered URLs
    ///
    /// A malformed seed or `limit == 0` gives an empty set. Errors are only
    /// returned when the concurrent coordinator cannot make progress.
    pub async fn crawl(&self, seed: &str, limit: usize) -> Result<HashSet<String>, CrawlError> {
        match self.mode {
            CrawlMode::Concurrent => {
                let coordinator = Coordinator::new(
                    Arc::clone(&self.fetcher),
                    Arc::clone(&self.policy),
                    self.worker_count,
                );
                coordinator.run(seed, limit).await
            }
            CrawlMode::Sequential => {
                Ok(crawl_sequential(seed, limit, self.fetcher.as_ref(), self.policy.as_ref()).await)
            }
        }
    }
}

/// Runs a complete crawl with HTTP collaborators
///
/// This is the main entry point used by the command line.
///
/// # Example
///
/// ```no_run
/// use sumi_crawl::config::Config;
/// use sumi_crawl::crawler::{crawl, CrawlMode};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let urls = crawl(&Config::default(), CrawlMode::Concurrent, "https://example.com/", 50).await?;
/// for url in urls {
///     println!("{}", url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn crawl(
    config: &Config,
    mode: CrawlMode,
    seed: &str,
    limit: usize,
) -> Result<HashSet<String>, CrawlError> {
    validate(config)?;
    Crawler::from_config(config, mode)?.crawl(seed, limit).await
}

/// Available parallelism capped at 256, or 1 when it cannot be determined
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get().min(256))
        .unwrap_or(1)
}
