//! Sitewalk main entry point
//!
//! This is the command-line interface for the Sitewalk link crawler.

use anyhow::Context;
use clap::Parser;
use sitewalk::config::{load_config_with_hash, validate, Config};
use sitewalk::crawler::crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitewalk: a single-host link frontier crawler
///
/// Sitewalk crawls outward from a list of seed URLs, skips links disallowed
/// by each origin's robots.txt, and rewrites the list of discovered links
/// after every page.
#[derive(Parser, Debug)]
#[command(name = "sitewalk")]
#[command(version)]
#[command(about = "A single-host link frontier crawler", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Seed URL list, one URL per line
    #[arg(long, value_name = "FILE")]
    seeds: Option<String>,

    /// URLs that must never be crawled, one per line
    #[arg(long, value_name = "FILE")]
    ignore: Option<String>,

    /// Where discovered links are written
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Only queue links with an http or https scheme
    #[arg(long)]
    http_only: bool,

    /// Stop after this many crawled pages (0 = no limit)
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Increase logging verbosity (-v, -vv, -vvv)
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

    let config = load_settings(&cli)?;

    tracing::info!(
        "Seeds: {}, ignore list: {}, output: {}",
        config.input.seeds_path,
        config.input.ignore_path,
        config.output.links_path
    );

    crawl(&config).await.context("Crawl failed")?;
    tracing::info!("Crawl completed successfully");

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// `RUST_LOG` takes precedence when set.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("sitewalk=info,warn"),
                1 => EnvFilter::new("sitewalk=debug,info"),
                2 => EnvFilter::new("sitewalk=trace,debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any) and applies command-line overrides
fn load_settings(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(seeds) = &cli.seeds {
        config.input.seeds_path = seeds.clone();
    }
    if let Some(ignore) = &cli.ignore {
        config.input.ignore_path = ignore.clone();
    }
    if let Some(output) = &cli.output {
        config.output.links_path = output.clone();
    }
    if cli.http_only {
        config.crawler.http_only = true;
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }

    validate(&config).context("Invalid settings")?;

    Ok(config)
}
