//! Sumi-Crawl: a breadth-first, robots-aware web crawler
//!
//! This crate discovers pages reachable from a seed URL up to a fixed count,
//! either with a concurrent master/worker engine or with a plain sequential
//! traversal, consulting each host's robots.txt before every fetch.

pub mod config;
pub mod crawler;
pub mod robots;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Crawl operations
///
/// Per-URL failures (bad links, unreachable pages, missing robots.txt) never
/// surface here; they degrade to "no links". Only failures of the crawl
/// machinery itself are reported.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Work queue closed while {outstanding} batches were still outstanding")]
    QueueClosed { outstanding: usize },

    #[error("Crawl worker failed: {0}")]
    WorkerPanicked(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),
}

/// Result type alias for Sumi-Crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlMode, Crawler, PageFetcher};
pub use robots::{CrawlPolicy, RobotsCache};
pub use crate::url::{host_identifier, parse_crawl_url};
