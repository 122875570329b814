//! Crawl coordination
//!
//! Owns the frontier and the gate, runs the worker loop, and writes the
//! final report once every worker has drained.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::frontier::Frontier;
use crate::gate::PageGate;
use crate::stats::write_report;
use crate::url::canonicalize_absolute;
use crate::{ConfigError, Result, SieveError};
use reqwest::Client;
use std::path::Path;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

/// Progress is logged every this many processed pages
const PROGRESS_INTERVAL: u64 = 25;

/// Main crawl coordinator
pub struct Coordinator {
    config: Arc<Config>,
    gate: Arc<PageGate>,
    client: Client,
    frontier: Arc<Mutex<Frontier>>,
}

impl Coordinator {
    /// Creates a coordinator and seeds its frontier from configuration
    pub fn new(config: Config) -> Result<Self> {
        if config.crawl.seeds.is_empty() {
            return Err(SieveError::Config(ConfigError::Validation(
                "a crawl requires at least one seed URL".to_string(),
            )));
        }

        let mut frontier = Frontier::new();
        for seed in &config.crawl.seeds {
            let url = canonicalize_absolute(seed)?;
            frontier.push(url);
        }

        let client = build_http_client()?;
        let gate = Arc::new(PageGate::new(&config));

        Ok(Self {
            config: Arc::new(config),
            gate,
            client,
            frontier: Arc::new(Mutex::new(frontier)),
        })
    }

    /// Runs the crawl to completion and writes the report
    ///
    /// Spawns the configured number of workers; each repeatedly takes a URL
    /// from the frontier, waits the polite delay, fetches, runs the gate,
    /// and re-queues whatever links come back. A worker only exits when the
    /// frontier is empty AND no other worker is mid-page (a page in flight
    /// can still refill the frontier), so the crawl quiesces before the
    /// report is rendered.
    pub async fn run(&self) -> Result<()> {
        let started = std::time::Instant::now();
        let pages_processed = Arc::new(AtomicU64::new(0));
        let in_flight = Arc::new(AtomicUsize::new(0));

        tracing::info!(
            "starting crawl: {} seeds, {} workers, max {} pages",
            self.frontier.lock().unwrap().len(),
            self.config.crawl.max_concurrent_fetches,
            self.config.crawl.max_pages
        );

        let mut workers = Vec::new();
        for worker_id in 0..self.config.crawl.max_concurrent_fetches {
            let config = Arc::clone(&self.config);
            let gate = Arc::clone(&self.gate);
            let frontier = Arc::clone(&self.frontier);
            let client = self.client.clone();
            let pages_processed = Arc::clone(&pages_processed);
            let in_flight = Arc::clone(&in_flight);

            workers.push(tokio::spawn(async move {
                worker_loop(
                    worker_id,
                    config,
                    gate,
                    frontier,
                    client,
                    pages_processed,
                    in_flight,
                )
                .await;
            }));
        }

        for worker in workers {
            // A worker task only ends by returning; a panic here is a bug
            // worth surfacing, not swallowing
            if let Err(e) = worker.await {
                tracing::error!("crawl worker failed: {}", e);
            }
        }

        let total = pages_processed.load(Ordering::SeqCst);
        tracing::info!(
            "crawl complete: {} pages processed in {:?}",
            total,
            started.elapsed()
        );

        let report = self.gate.render_report();
        let report_path = Path::new(&self.config.output.report_path);
        write_report(&report, report_path)?;
        tracing::info!("report written to {}", report_path.display());

        Ok(())
    }
}

/// One worker's fetch-and-process loop
async fn worker_loop(
    worker_id: u32,
    config: Arc<Config>,
    gate: Arc<PageGate>,
    frontier: Arc<Mutex<Frontier>>,
    client: Client,
    pages_processed: Arc<AtomicU64>,
    in_flight: Arc<AtomicUsize>,
) {
    loop {
        if pages_processed.load(Ordering::SeqCst) >= config.crawl.max_pages {
            tracing::debug!("worker {} stopping: page budget reached", worker_id);
            break;
        }

        // Pop and the in-flight increment happen under one lock so an idle
        // worker can never observe "empty frontier, nothing in flight"
        // while a page that may yield links is still being processed
        let next = {
            let mut frontier = frontier.lock().unwrap();
            let next = frontier.pop();
            if next.is_some() {
                in_flight.fetch_add(1, Ordering::SeqCst);
            }
            next
        };
        let url = match next {
            Some(url) => url,
            None => {
                if in_flight.load(Ordering::SeqCst) == 0 {
                    tracing::debug!("worker {} stopping: frontier drained", worker_id);
                    break;
                }
                // Another worker may still refill the frontier
                tokio::time::sleep(Duration::from_millis(50)).await;
                continue;
            }
        };

        tokio::time::sleep(Duration::from_millis(config.crawl.fetch_delay_ms)).await;
        let response = fetch_page(&client, url.as_str()).await;

        match gate.process(url.as_str(), &response) {
            Ok(decision) => {
                tracing::debug!("{}: {} ({} links)", url, decision.outcome, decision.links.len());
                if !decision.links.is_empty() {
                    let mut frontier = frontier.lock().unwrap();
                    for link in &decision.links {
                        match Url::parse(link) {
                            Ok(link_url) => {
                                frontier.push(link_url);
                            }
                            Err(e) => tracing::debug!("dropping link {}: {}", link, e),
                        }
                    }
                }
            }
            Err(e) => tracing::warn!("failed to process {}: {}", url, e),
        }

        let done = pages_processed.fetch_add(1, Ordering::SeqCst) + 1;
        if done % PROGRESS_INTERVAL == 0 {
            let frontier_size = frontier.lock().unwrap().len();
            let unique = gate.with_stats(|s| s.unique_page_count());
            tracing::info!(
                "progress: {} pages processed, {} queued, {} unique",
                done,
                frontier_size,
                unique
            );
        }

        in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Runs a complete crawl with the given configuration
pub async fn run_crawl(config: Config) -> Result<()> {
    Coordinator::new(config)?.run().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinator_requires_seeds() {
        let config = Config::default();
        assert!(Coordinator::new(config).is_err());
    }

    #[test]
    fn test_coordinator_rejects_malformed_seed() {
        let mut config = Config::default();
        config.crawl.seeds = vec!["::not-a-url::".to_string()];
        assert!(Coordinator::new(config).is_err());
    }

    #[test]
    fn test_coordinator_dedupes_seeds() {
        let mut config = Config::default();
        config.crawl.seeds = vec![
            "https://ics.uci.edu/".to_string(),
            "https://ics.uci.edu/#fragment".to_string(),
        ];
        let coordinator = Coordinator::new(config).unwrap();
        assert_eq!(coordinator.frontier.lock().unwrap().len(), 1);
    }
}
