//! Page-Sieve main entry point
//!
//! Command-line interface for running a gated crawl session.

use anyhow::Context;
use clap::Parser;
use page_sieve::config::load_config_with_hash;
use page_sieve::crawler::run_crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Page-Sieve: content admission control for a focused web crawler
///
/// Crawls from the configured seeds, keeping only in-scope, trap-free,
/// non-duplicate pages, and writes a statistics report at the end of the
/// session.
#[derive(Parser, Debug)]
#[command(name = "page-sieve")]
#[command(version)]
#[command(about = "Content-gated web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Override the configured page budget
    #[arg(long, value_name = "N")]
    max_pages: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("loading configuration from {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("configuration loaded (hash: {})", config_hash);

    if let Some(max_pages) = cli.max_pages {
        config.crawl.max_pages = max_pages;
    }

    if cli.dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    run_crawl(config).await.context("crawl failed")?;

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_sieve=info,warn"),
            1 => EnvFilter::new("page_sieve=debug,info"),
            2 => EnvFilter::new("page_sieve=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Prints what the loaded configuration would do, without crawling
fn print_dry_run(config: &page_sieve::config::Config) {
    println!("=== Page-Sieve Dry Run ===\n");

    println!("Crawl:");
    println!("  Seeds ({}):", config.crawl.seeds.len());
    for seed in &config.crawl.seeds {
        println!("    - {}", seed);
    }
    println!("  Workers: {}", config.crawl.max_concurrent_fetches);
    println!("  Fetch delay: {}ms", config.crawl.fetch_delay_ms);
    println!("  Page budget: {}", config.crawl.max_pages);

    println!("\nScope ({} suffixes):", config.scope.allow.len());
    for entry in &config.scope.allow {
        match &entry.path_prefix {
            Some(prefix) => println!("  - {} (requires path {})", entry.suffix, prefix),
            None => println!("  - {}", entry.suffix),
        }
    }

    println!("\nFilter:");
    println!(
        "  Blocked extensions: {}",
        config.filter.blocked_extensions.len()
    );
    println!(
        "  Blocked query params: {}",
        config.filter.blocked_query_params.len()
    );
    println!("  Max query length: {}", config.filter.max_query_length);

    println!("\nGate:");
    println!("  Max body bytes: {}", config.gate.max_body_bytes);
    println!("  Min word count: {}", config.gate.min_word_count);
    println!(
        "  Sparse rejection: < {} words over {} bytes",
        config.gate.sparse_word_count, config.gate.sparse_body_bytes
    );

    println!("\nDedup:");
    println!(
        "  Similarity threshold: {}",
        config.dedup.similarity_threshold
    );
    println!("  Min token count: {}", config.dedup.min_token_count);

    println!("\nStats domain: {}", config.stats.domain_suffix);
    println!("Report path: {}", config.output.report_path);

    println!("\n✓ Configuration is valid");
}
