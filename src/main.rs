//! Price-Ripple main entry point
//!
//! This is the command-line interface for the Price-Ripple price watcher.

use anyhow::Context;
use clap::Parser;
use price_ripple::config::{load_config_with_hash, Config};
use price_ripple::output::{load_statistics, print_statistics};
use price_ripple::scrape::{scrape_once, Scheduler};
use price_ripple::TracingSink;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Price-Ripple: a periodic price watcher
///
/// Price-Ripple fetches a list of product pages at a fixed interval, reads
/// the price from each one with a CSS selector, and appends the values to a
/// CSV dataset.
#[derive(Parser, Debug)]
#[command(name = "price-ripple")]
#[command(version = "1.0.0")]
#[command(about = "A periodic price watcher", long_about = None)]
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

    /// Validate config and show what would be scraped without scraping
    #[arg(long, conflicts_with_all = ["stats", "once"])]
    dry_run: bool,

    /// Show statistics from the dataset and exit
    #[arg(long, conflicts_with_all = ["dry_run", "once"])]
    stats: bool,

    /// Run a single round, save it, and exit
    #[arg(long, conflicts_with_all = ["dry_run", "stats"])]
    once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else if cli.once {
        handle_once(&config).await?;
    } else {
        handle_run(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("price_ripple=info,warn"),
            1 => EnvFilter::new("price_ripple=debug,info"),
            2 => EnvFilter::new("price_ripple=trace,debug"),
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

/// Handles the --dry-run mode: shows the configuration and targets
fn handle_dry_run(config: &Config) {
    println!("=== Price-Ripple Dry Run ===\n");

    println!("Scraper Configuration:");
    println!("  Interval: {} minutes", config.scraper.interval_minutes);
    println!("  Sleep slice: {}s", config.scraper.sleep_slice_secs);
    println!("  Request timeout: {}s", config.scraper.request_timeout_secs);
    println!("  User agent: {}", config.scraper.user_agent);

    println!("\nOutput:");
    println!("  Dataset: {}", config.output.dataset_path);

    println!("\nTargets ({}):", config.targets.len());
    for target in &config.targets {
        match &target.selector {
            Some(selector) => println!("  - {} [{}]", target.url, selector),
            None => println!("  - {} [default selectors]", target.url),
        }
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: summarizes the dataset
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Dataset: {}\n", config.output.dataset_path);

    let stats = load_statistics(Path::new(&config.output.dataset_path))?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the --once mode: one round, then exit
async fn handle_once(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Running a single round over {} targets", config.targets.len());
    scrape_once(config, Arc::new(TracingSink)).await?;
    Ok(())
}

/// Handles the main scrape loop until Ctrl-C
async fn handle_run(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Watching {} targets every {} minutes, saving to {}",
        config.targets.len(),
        config.scraper.interval_minutes,
        config.output.dataset_path
    );

    let scheduler = Scheduler::from_config(config, Arc::new(TracingSink))?;
    scheduler.start(config.targets.clone(), config.scraper.interval_minutes);

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;

    scheduler.stop();
    scheduler.join().await;

    Ok(())
}
