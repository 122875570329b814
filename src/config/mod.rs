//! Configuration loading and validation for Page-Sieve
//!
//! Configuration is read from a TOML file. Every section has defaults
//! matching the UCI ICS crawl deployment, so a minimal file only needs seed
//! URLs.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{
    AllowEntry, Config, CrawlConfig, DedupConfig, FilterConfig, GateConfig, OutputConfig,
    ScopeConfig, StatsConfig,
};
pub use validation::validate;
