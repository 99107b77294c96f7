//! Concurrent crawl coordinator
//!
//! The coordinator is the master in a master/worker scheme:
//! - It alone owns the visited set and the outstanding-work counter
//! - Workers fetch one page each and send the links they found back as a
//!   single batch on an unbounded channel
//! - The coordinator blocks on that channel, admits new URLs, and spawns a
//!   worker per admitted URL
//!
//! Every dispatched worker sends exactly one batch, possibly empty. The seed
//! batch counts as one unit of outstanding work, so the crawl is finished
//! exactly when the counter drops to zero, or earlier when the limit is hit.

use crate::crawler::fetcher::PageFetcher;
use crate::robots::CrawlPolicy;
use crate::url::parse_crawl_url;
use crate::CrawlError;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Links discovered on one page, or the singleton seed
pub type Batch = Vec<String>;

/// Main concurrent crawl structure
///
/// A coordinator can run any number of crawls; each [`Coordinator::run`]
/// call gets its own queue, visited set, and worker set. Collaborators are
/// shared, so a robots cache passed in here is reused across runs.
pub struct Coordinator {
    fetcher: Arc<dyn PageFetcher>,
    policy: Arc<dyn CrawlPolicy>,
    permits: Arc<Semaphore>,
    worker_count: usize,
}

impl Coordinator {
    /// Creates a coordinator
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Produces the links of a page
    /// * `policy` - Consulted before every fetch
    /// * `worker_count` - Maximum number of pages fetched at once (at least 1)
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        policy: Arc<dyn CrawlPolicy>,
        worker_count: usize,
    ) -> Self {
        let worker_count = worker_count.max(1);
        Self {
            fetcher,
            policy,
            permits: Arc::new(Semaphore::new(worker_count)),
            worker_count,
        }
    }

    /// Maximum number of concurrent page fetches
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Crawls from `seed` until `limit` URLs are known or no work remains
    ///
    /// # Returns
    ///
    /// * `Ok(HashSet<String>)` - At most `limit` URLs, the seed included when
    ///   it is well-formed and `limit > 0`
    /// * `Err(CrawlError)` - The coordination machinery itself broke down
    ///   (a worker panicked or the work queue closed)
    pub async fn run(&self, seed: &str, limit: usize) -> Result<HashSet<String>, CrawlError> {
        let mut visited = HashSet::new();
        if limit == 0 {
            return Ok(visited);
        }

        tracing::info!("Starting concurrent crawl from {} (limit {})", seed, limit);
        let start_time = Instant::now();

        let (tx, mut rx) = mpsc::unbounded_channel::<Batch>();
        let stop = Arc::new(AtomicBool::new(false));
        let mut workers = JoinSet::new();

        tx.send(vec![seed.to_string()])
            .map_err(|_| CrawlError::QueueClosed { outstanding: 1 })?;
        let mut outstanding: usize = 1;

        let outcome = loop {
            if outstanding == 0 {
                tracing::debug!("No outstanding work, crawl complete");
                break Ok(());
            }

            let batch = tokio::select! {
                batch = rx.recv() => match batch {
                    Some(batch) => batch,
                    None => break Err(CrawlError::QueueClosed { outstanding }),
                },
                Some(joined) = workers.join_next(), if !workers.is_empty() => {
                    match joined {
                        Err(e) if e.is_panic() => break Err(CrawlError::WorkerPanicked(e.to_string())),
                        _ => continue,
                    }
                }
            };

            let mut limit_reached = false;
            for raw in batch {
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
                    limit_reached = true;
                    break;
                }

                outstanding += 1;
                workers.spawn(crawl_page(
                    url,
                    Arc::clone(&self.fetcher),
                    Arc::clone(&self.policy),
                    Arc::clone(&self.permits),
                    Arc::clone(&stop),
                    tx.clone(),
                ));
            }
            outstanding -= 1;

            if limit_reached {
                tracing::debug!("Limit of {} URLs reached", limit);
                break Ok(());
            }
        };

        // In-flight workers may still be waiting on the network; their
        // batches are never read.
        stop.store(true, Ordering::SeqCst);
        workers.abort_all();

        tracing::info!(
            "Concurrent crawl finished: {} URLs in {:?}",
            visited.len(),
            start_time.elapsed()
        );

        outcome.map(|()| visited)
    }
}

/// Worker body: check robots, fetch, report exactly one batch
async fn crawl_page(
    url: Url,
    fetcher: Arc<dyn PageFetcher>,
    policy: Arc<dyn CrawlPolicy>,
    permits: Arc<Semaphore>,
    stop: Arc<AtomicBool>,
    tx: UnboundedSender<Batch>,
) {
    // The semaphore is never closed, so this only fails in theory; an empty
    // batch still keeps the coordinator's count balanced.
    let _permit = permits.acquire_owned().await.ok();

    let links = if stop.load(Ordering::SeqCst) {
        Vec::new()
    } else if !policy.is_allowed(&url).await {
        tracing::debug!("URL {} disallowed by robots.txt", url);
        Vec::new()
    } else {
        fetcher.fetch_links(&url).await
    };

    // After shutdown the receiver is gone and the batch is dropped.
    let _ = tx.send(links);
}
