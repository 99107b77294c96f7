use crate::crawler::{default_worker_count, CrawlMode};
use serde::Deserialize;

/// Main configuration structure for Sumi-Crawl
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of concurrent page fetches
    #[serde(rename = "worker-count", default = "default_worker_count")]
    pub worker_count: usize,

    /// Timeout for each page or robots.txt request (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            worker_count: default_worker_count(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler; defaults to a per-mode name
    #[serde(rename = "crawler-name", default)]
    pub crawler_name: Option<String>,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: None,
            crawler_version: default_crawler_version(),
        }
    }
}

fn default_crawler_version() -> String {
    "1.0".to_string()
}

impl UserAgentConfig {
    /// Agent name matched against robots.txt groups
    pub fn agent_name(&self, mode: CrawlMode) -> String {
        self.crawler_name
            .clone()
            .unwrap_or_else(|| mode.default_agent_name().to_string())
    }

    /// Value of the `User-Agent` header: `Name/Version`
    pub fn header_value(&self, mode: CrawlMode) -> String {
        format!("{}/{}", self.agent_name(mode), self.crawler_version)
    }
}
