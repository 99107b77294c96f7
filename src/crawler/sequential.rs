//! Sequential breadth-first crawl
//!
//! Same contract as the concurrent [`Coordinator`](super::Coordinator), run
//! on a single thread of control with a plain FIFO queue. Useful as a
//! reference for the concurrent engine and where spawning tasks is not
//! wanted.

use crate::crawler::fetcher::PageFetcher;
use crate::robots::CrawlPolicy;
use crate::url::parse_crawl_url;
use std::collections::{HashSet, VecDeque};
use std::time::Instant;

/// Crawls from `seed` one page at a time
///
/// URLs are admitted in breadth-first order until `limit` are known or the
/// queue runs dry. Disallowed URLs are admitted but not fetched.
pub async fn crawl_sequential(
    seed: &str,
    limit: usize,
    fetcher: &dyn PageFetcher,
    policy: &dyn CrawlPolicy,
) -> HashSet<String> {
    let mut visited = HashSet::new();
    if limit == 0 {
        return visited;
    }

    tracing::info!("Starting sequential crawl from {} (limit {})", seed, limit);
    let start_time = Instant::now();

    let mut queue = VecDeque::from([seed.to_string()]);
    while let Some(raw) = queue.pop_front() {
        if visited.contains(&raw) {
            continue;
        }

        let url = match parse_crawl_url(&raw) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping malformed URL: {}", e);
                continue;
            }
        };

        visited.insert(raw);
        if visited.len() == limit {
            break;
        }

        if policy.is_allowed(&url).await {
            queue.extend(fetcher.fetch_links(&url).await);
        } else {
            tracing::debug!("URL {} disallowed by robots.txt", url);
        }
    }

    tracing::info!(
        "Sequential crawl finished: {} URLs in {:?}",
        visited.len(),
        start_time.elapsed()
    );

    visited
}
