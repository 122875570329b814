//! Crawl statistics
//!
//! Running aggregates over the whole session: unique pages, per-subdomain
//! page counts, global word frequencies and the longest page seen, plus the
//! final plain-text report.

mod aggregator;
mod report;

pub use aggregator::{LongestPageRecord, StatsAggregator, DEFAULT_STOP_WORDS};
pub use report::write_report;
