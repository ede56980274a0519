//! Worker pool and request pacing
//!
//! The scheduler fans resolver invocations out over a bounded pool of
//! workers. Request rate is governed by a single pacing clock shared by
//! all workers, so raising the worker count does not multiply the request
//! rate against the catalog; extra workers only stop one slow request
//! from stalling the whole pipeline.

use crate::config::ScraperConfig;
use crate::model::ScrapedProduct;
use crate::output::IncrementalLog;
use crate::parser::CatalogParser;
use crate::scrape::fetcher::build_http_client;
use crate::scrape::resolver::resolve_mpn;
use reqwest::Client;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::Instant;

/// Progress callback invoked once per completed MPN with
/// (completed, total, mpn)
pub type ProgressCallback = Arc<dyn Fn(usize, usize, &str) + Send + Sync>;

/// Global pacing clock
///
/// Task starts are spaced `delay` apart measured start-to-start across all
/// workers. Each caller reserves the next free start slot under the lock,
/// then sleeps outside it until the slot arrives.
pub struct Pacer {
    delay: Duration,
    next_start: tokio::sync::Mutex<Instant>,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_start: tokio::sync::Mutex::new(Instant::now()),
        }
    }

    /// Waits until the caller's reserved start slot arrives
    pub async fn acquire(&self) {
        let wait = {
            let mut next = self.next_start.lock().await;
            let now = Instant::now();
            let slot = if *next > now { *next } else { now };
            *next = slot + self.delay;
            slot.saturating_duration_since(now)
        };

        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
    }
}

/// Runs resolver invocations for many MPNs under a concurrency bound
pub struct Scheduler {
    config: Arc<ScraperConfig>,
    client: Client,
    parser: Arc<dyn CatalogParser>,
    shutdown: Arc<AtomicBool>,
}

impl Scheduler {
    /// Creates a scheduler, building the shared HTTP client
    pub fn new(
        config: ScraperConfig,
        parser: Arc<dyn CatalogParser>,
    ) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config.timeout())?;
        Ok(Self {
            config: Arc::new(config),
            client,
            parser,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Flag that stops new task starts when set; in-flight tasks finish
    /// and persist normally
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Resolves all MPNs and returns the completed results
    ///
    /// Each completed result is appended to the incremental log before the
    /// progress callback fires, so a crash never reports work it has not
    /// persisted. Per-MPN failures are recorded in their results; the run
    /// always continues to the end.
    ///
    /// MPNs skipped because shutdown was requested produce no result and
    /// no log line, so a later `--resume` run picks them up.
    pub async fn run_all(
        &self,
        mpns: Vec<String>,
        log: Arc<IncrementalLog>,
        on_progress: Option<ProgressCallback>,
    ) -> Vec<ScrapedProduct> {
        let total = mpns.len();
        let semaphore = Arc::new(Semaphore::new(self.config.workers as usize));
        let pacer = Arc::new(Pacer::new(Duration::from_millis(self.config.delay_ms)));
        let results = Arc::new(Mutex::new(Vec::with_capacity(total)));
        let completed = Arc::new(AtomicUsize::new(0));

        tracing::info!(
            "Starting scraper with {} worker(s), {} MPNs, {}ms between requests",
            self.config.workers,
            total,
            self.config.delay_ms
        );

        let mut handles = Vec::with_capacity(total);
        for mpn in mpns {
            let config = Arc::clone(&self.config);
            let client = self.client.clone();
            let parser = Arc::clone(&self.parser);
            let shutdown = Arc::clone(&self.shutdown);
            let semaphore = Arc::clone(&semaphore);
            let pacer = Arc::clone(&pacer);
            let log = Arc::clone(&log);
            let results = Arc::clone(&results);
            let completed = Arc::clone(&completed);
            let on_progress = on_progress.clone();

            handles.push(tokio::spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return;
                };

                // Graceful drain: skip tasks that have not started yet
                if shutdown.load(Ordering::SeqCst) {
                    tracing::debug!("Skipping {} (shutdown requested)", mpn);
                    return;
                }

                pacer.acquire().await;

                let result = resolve_mpn(&client, parser.as_ref(), &config, &mpn).await;

                // Persist before reporting; the log append is the commit
                // point for this MPN
                if let Err(e) = log.append(&result) {
                    tracing::error!("Failed to persist result for {}: {}", mpn, e);
                }

                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                tracing::info!("[{}/{}] {} -> {:?}", done, total, mpn, result.match_type);

                if let Some(callback) = &on_progress {
                    callback(done, total, &mpn);
                }

                results.lock().unwrap().push(result);
            }));
        }

        // Wait for every task; failures are already captured per MPN
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!("Worker task panicked: {}", e);
            }
        }

        let mut results = std::mem::take(&mut *results.lock().unwrap());
        results.shrink_to_fit();
        results
    }
}
