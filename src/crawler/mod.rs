//! Crawl driver
//!
//! A minimal fetch loop around the admission gate: seed the frontier, fetch
//! pages with a polite delay, feed every response through the gate and
//! re-queue the links it returns, then write the statistics report.
//!
//! Deliberately not here: robots.txt handling, retry/backoff (a failed
//! fetch simply becomes a rejected response) and frontier persistence.

mod coordinator;
mod fetcher;
mod frontier;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_page};
pub use frontier::Frontier;
