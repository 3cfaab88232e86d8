//! Crawler module for page fetching and frontier management
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching
//! - Link extraction from HTML
//! - The frontier engine that drives the crawl to completion

mod extractor;
mod fetcher;
mod frontier;

pub use extractor::{extract_links, parse_links, ExtractError};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use frontier::{Frontier, PageOutcome};

use crate::config::Config;
use crate::output::{CrawlStats, FileSink};
use crate::url::read_url_list;
use crate::{CrawlError, Result};
use std::io::ErrorKind;
use std::path::Path;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Read the seed list (fatal if missing or empty)
/// 2. Read the ignore list (optional)
/// 3. Build the HTTP client
/// 4. Run the frontier until the queue is exhausted, rewriting the output
///    file after every crawled page
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlStats)` - Crawl completed
/// * `Err(CrawlError)` - No seeds, unreadable input, or the output could not
///   be written
pub async fn crawl(config: &Config) -> Result<CrawlStats> {
    let seeds = load_seeds(Path::new(&config.input.seeds_path))?;
    let ignore = load_ignore_list(Path::new(&config.input.ignore_path))?;

    tracing::info!(
        "Loaded {} seed URLs and {} ignored URLs",
        seeds.len(),
        ignore.len()
    );

    let client = build_http_client(&config.http)?;
    let sink = FileSink::new(&config.output.links_path);

    let mut frontier = Frontier::new(client, seeds, ignore, sink, config.crawler.clone())?;
    frontier.run().await
}

/// Reads the seed list, rejecting an empty one
///
/// No output file is created when this fails.
pub fn load_seeds(path: &Path) -> Result<Vec<String>> {
    let seeds = read_url_list(path).map_err(|source| CrawlError::Input {
        path: path.display().to_string(),
        source,
    })?;

    if seeds.is_empty() {
        tracing::error!("No URLs found in {}", path.display());
        return Err(CrawlError::NoSeeds);
    }

    Ok(seeds)
}

/// Reads the ignore list; a missing file means nothing is ignored
pub fn load_ignore_list(path: &Path) -> Result<Vec<String>> {
    match read_url_list(path) {
        Ok(urls) => Ok(urls),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("Ignore list {} not found, ignoring nothing", path.display());
            Ok(Vec::new())
        }
        Err(source) => Err(CrawlError::Input {
            path: path.display().to_string(),
            source,
        }),
    }
}
