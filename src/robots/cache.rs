//! Per-host robots.txt cache shared by every crawl worker
//!
//! Each host gets one `OnceCell`. The map itself is guarded by a short-lived
//! mutex that is never held across an await; the cell serializes the
//! fetch-and-parse for its host, so concurrent workers asking about the same
//! host wait for a single request while other hosts proceed independently.

use crate::robots::source::{RobotsResponse, RobotsSource};
use crate::robots::{CrawlPolicy, ParsedRobots};
use crate::url::{host_identifier, robots_url};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;
use url::Url;

/// Cache mapping host identifiers to their robots.txt rules
///
/// Entries are written once and never expire: a crawl run is short-lived.
pub struct RobotsCache<S> {
    source: S,
    user_agent: String,
    hosts: Mutex<HashMap<String, Arc<OnceCell<ParsedRobots>>>>,
}

impl<S: RobotsSource> RobotsCache<S> {
    /// Creates an empty cache
    ///
    /// # Arguments
    ///
    /// * `source` - Where robots.txt documents come from
    /// * `user_agent` - The agent name matched against robots groups
    pub fn new(source: S, user_agent: impl Into<String>) -> Self {
        Self {
            source,
            user_agent: user_agent.into(),
            hosts: Mutex::new(HashMap::new()),
        }
    }

    /// The agent name rules are evaluated for
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Checks whether `url` may be fetched, loading its host's rules if needed
    ///
    /// Never fails: every problem obtaining robots.txt resolves to a cached
    /// allow-all or deny-all rule set as described on [`rules_for_response`].
    pub async fn is_allowed(&self, url: &Url) -> bool {
        let key = host_identifier(url);
        let cell = {
            let mut hosts = self.hosts.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(hosts.entry(key.clone()).or_default())
        };

        let rules = cell.get_or_init(|| self.load_rules(url, &key)).await;
        rules.is_allowed(url.as_str(), self.user_agent())
    }

    /// Number of hosts with resolved rules
    pub fn len(&self) -> usize {
        self.hosts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|cell| cell.initialized())
            .count()
    }

    /// True when no host has been resolved yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn load_rules(&self, url: &Url, key: &str) -> ParsedRobots {
        let Some(robots_url) = robots_url(url) else {
            tracing::debug!("No robots.txt for non-HTTP host {}, denying", key);
            return ParsedRobots::deny_all();
        };

        tracing::debug!("Fetching robots.txt for {}: {}", self.user_agent(), robots_url);
        let response = self.source.fetch(&robots_url).await;
        if let RobotsResponse::Failed(error) = &response {
            tracing::warn!("Failed to fetch {}: {}", robots_url, error);
        }
        rules_for_response(response)
    }
}

#[async_trait]
impl<S: RobotsSource> CrawlPolicy for RobotsCache<S> {
    async fn is_allowed(&self, url: &Url) -> bool {
        RobotsCache::is_allowed(self, url).await
    }
}

/// Maps a robots.txt response to the rules cached for the host
///
/// | Response | Rules |
/// |----------|-------|
/// | 2xx | parsed body |
/// | 4xx | allow all |
/// | other status | deny all |
/// | transport failure | deny all |
pub fn rules_for_response(response: RobotsResponse) -> ParsedRobots {
    match response {
        RobotsResponse::Status { status, body } if (200..300).contains(&status) => {
            ParsedRobots::from_content(&body)
        }
        RobotsResponse::Status { status, .. } if (400..500).contains(&status) => {
            ParsedRobots::allow_all()
        }
        RobotsResponse::Status { .. } | RobotsResponse::Failed(_) => ParsedRobots::deny_all(),
    }
}
