//! Catalog Harvest main entry point
//!
//! This is the command-line interface for the catalog harvester.

use anyhow::Context;
use catalog_harvest::catalog::known_categories;
use catalog_harvest::config::{load_config_with_hash, validate, Config};
use catalog_harvest::crawler::run_harvest;
use catalog_harvest::output::{category_file_name, print_statistics};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalog Harvest: a one-shot product catalog extractor
///
/// Fetches every catalog section's listing pages, extracts the product
/// tables and writes them as JSON files. Runs with built-in defaults when no
/// configuration file is given.
#[derive(Parser, Debug)]
#[command(name = "catalog-harvest")]
#[command(version)]
#[command(about = "A one-shot product catalog extractor", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Directory output files are written to (overrides the config file)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Maximum listing pages per category (overrides the config file)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: Option<u32>,

    /// Show what would be harvested without sending any request
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.display().to_string();
    }
    if let Some(max_pages) = cli.max_pages {
        config.listing.max_pages = max_pages;
    }

    validate(&config).context("invalid settings")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    tracing::info!(
        "Harvesting {} into {}",
        config.site.base_url,
        config.output.directory
    );

    let stats = run_harvest(config).await.context("harvest failed")?;

    if !cli.quiet {
        print_statistics(&stats);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_harvest=info,warn"),
            1 => EnvFilter::new("catalog_harvest=debug,info"),
            _ => EnvFilter::new("catalog_harvest=trace,debug"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the plan without fetching
fn handle_dry_run(config: &Config) {
    println!("=== Catalog Harvest Dry Run ===\n");

    println!("Site:");
    println!("  Categories page: {}", config.site.categories_url());
    println!("  Listing endpoint: {}", config.site.listing_endpoint());
    println!("  User agent: {}", config.site.user_agent);

    println!("\nPacing:");
    println!("  Max pages per category: {}", config.listing.max_pages);
    println!(
        "  Page delay: {}-{}ms",
        config.throttle.page_delay_ms.min, config.throttle.page_delay_ms.max
    );
    println!(
        "  Category delay: {}-{}ms",
        config.throttle.category_delay_ms.min, config.throttle.category_delay_ms.max
    );
    println!("  Request timeout: {}s", config.fetcher.timeout_secs);

    let categories = known_categories(&config.site.listing_endpoint());
    println!("\nCategories ({}):", categories.len());
    for category in &categories {
        println!(
            "  - {} -> {}/{}",
            category.name,
            config.output.directory,
            category_file_name(&category.name)
        );
        println!("    {}", category.url);
    }

    println!(
        "\n✓ Would fetch up to {} listing pages",
        categories.len() * config.listing.max_pages as usize
    );
}
