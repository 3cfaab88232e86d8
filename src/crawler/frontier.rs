//! Frontier engine - the main crawl loop
//!
//! The frontier owns all crawl state:
//! - a LIFO work queue (most recently discovered URL is crawled next)
//! - the set of URLs already crawled
//! - the discovered set, in first-seen order
//! - the per-origin robots policy cache
//!
//! Each iteration pops one URL, resolves its origin's robots policy, extracts
//! the page's links, filters them through the disallow list, merges the
//! survivors and persists the discovered set. The loop ends when the queue is
//! empty.

use crate::config::CrawlerConfig;
use crate::crawler::extract_links;
use crate::output::{CrawlStats, LinkSink};
use crate::robots::{self, RobotsCache, RobotsPolicy};
use crate::url::{is_http_like, parse_absolute, Origin};
use crate::{CrawlError, Result};
use reqwest::Client;
use std::collections::HashSet;

/// What happened to a URL popped from the queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The URL is in the ignore list; nothing was fetched
    Ignored,
    /// No origin could be derived from the URL; nothing was fetched
    Skipped,
    /// Link extraction failed; the URL is not marked as crawled
    Failed,
    /// Links were extracted and merged
    Crawled {
        /// Links that survived robots filtering
        found: usize,
        /// How many of those were new to the discovered set
        new: usize,
    },
}

/// Unique URLs in first-seen order
#[derive(Debug, Default)]
struct DiscoveredSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl DiscoveredSet {
    /// Inserts a URL, returning false if it was already present
    fn insert(&mut self, url: &str) -> bool {
        if self.seen.contains(url) {
            return false;
        }
        self.seen.insert(url.to_string());
        self.order.push(url.to_string());
        true
    }

    fn as_slice(&self) -> &[String] {
        &self.order
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

/// The crawl frontier
pub struct Frontier<S: LinkSink> {
    client: Client,
    sink: S,
    options: CrawlerConfig,
    ignore: HashSet<String>,
    queue: Vec<String>,
    crawled: HashSet<String>,
    discovered: DiscoveredSet,
    robots: RobotsCache,
    stats: CrawlStats,
}

impl<S: LinkSink> Frontier<S> {
    /// Creates a frontier seeded with the given URLs
    ///
    /// Seeds are used as a stack, so the last seed is crawled first.
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client for robots.txt and page fetches
    /// * `seeds` - Starting URLs
    /// * `ignore` - URLs that must never be fetched
    /// * `sink` - Where the discovered set is persisted after each page
    /// * `options` - Crawler behavior options
    ///
    /// # Returns
    ///
    /// * `Ok(Frontier)` - Ready to run
    /// * `Err(CrawlError::NoSeeds)` - `seeds` is empty or holds only empty
    ///   strings
    pub fn new<I>(
        client: Client,
        seeds: Vec<String>,
        ignore: I,
        sink: S,
        options: CrawlerConfig,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        if seeds.iter().all(|seed| seed.is_empty()) {
            return Err(CrawlError::NoSeeds);
        }

        Ok(Self {
            client,
            sink,
            options,
            ignore: ignore.into_iter().collect(),
            queue: seeds,
            crawled: HashSet::new(),
            discovered: DiscoveredSet::default(),
            robots: RobotsCache::new(),
            stats: CrawlStats::start(),
        })
    }

    /// Runs until the queue is empty or the page limit is reached
    ///
    /// Per-URL problems are logged and skipped. The only error returned is a
    /// failure to persist the discovered set.
    pub async fn run(&mut self) -> Result<CrawlStats> {
        tracing::info!("Starting crawl with {} queued URLs", self.queue.len());

        while !self.queue.is_empty() {
            if self.page_limit_reached() {
                tracing::info!(
                    "Page limit of {} reached, {} URLs left in queue",
                    self.options.max_pages,
                    self.queue.len()
                );
                break;
            }

            self.step().await?;
        }

        self.stats.finish();
        self.stats.log_summary();

        Ok(self.stats.clone())
    }

    /// Pops and processes a single URL
    ///
    /// Returns `Ok(None)` when the queue is already empty.
    pub async fn step(&mut self) -> Result<Option<PageOutcome>> {
        let Some(url) = self.queue.pop() else {
            return Ok(None);
        };

        let outcome = self.process(&url).await?;
        Ok(Some(outcome))
    }

    async fn process(&mut self, url: &str) -> Result<PageOutcome> {
        if self.ignore.contains(url) {
            tracing::info!("Ignoring page: {}", url);
            self.stats.pages_ignored += 1;
            return Ok(PageOutcome::Ignored);
        }

        tracing::info!("Crawling page: {}", url);

        let origin = match Origin::parse(url) {
            Ok(origin) => origin,
            Err(e) => {
                tracing::error!("Error: {}", e);
                self.stats.urls_skipped += 1;
                return Ok(PageOutcome::Skipped);
            }
        };

        let policy = self.policy_for(&origin).await;

        let links = match extract_links(&self.client, url).await {
            Ok(links) => links,
            Err(e) => {
                tracing::error!("{}", e);
                tracing::error!("Error while scraping links from {}", url);
                self.stats.pages_failed += 1;
                return Ok(PageOutcome::Failed);
            }
        };

        let (found, new) = self.merge(url, links, &policy);
        tracing::info!("{} URLs found", found);

        self.crawled.insert(url.to_string());
        self.stats.pages_crawled += 1;
        self.stats.links_discovered = self.discovered.len() as u64;
        tracing::info!("{} URLs discovered so far", self.discovered.len());

        self.sink.persist(self.discovered.as_slice())?;

        Ok(PageOutcome::Crawled { found, new })
    }

    /// Returns the policy for an origin, resolving it on first use
    async fn policy_for(&mut self, origin: &Origin) -> RobotsPolicy {
        if let Some(policy) = self.robots.get(origin) {
            return policy.clone();
        }

        let policy = robots::resolve(&self.client, origin).await;
        self.stats.origins_resolved += 1;
        self.robots.insert(origin.clone(), policy).clone()
    }

    /// Filters extracted links and merges them into the discovered set and queue
    ///
    /// Returns the number of links that survived robots filtering and the
    /// number that were new to the discovered set.
    fn merge(
        &mut self,
        current: &str,
        links: Vec<String>,
        policy: &RobotsPolicy,
    ) -> (usize, usize) {
        let mut found = 0;
        let mut new = 0;

        for link in links {
            if policy.is_disallowed(&link) {
                tracing::debug!("Disallowed by robots.txt: {}", link);
                self.stats.links_disallowed += 1;
                continue;
            }

            if let Err(e) = parse_absolute(&link) {
                tracing::debug!("Dropping malformed link: {}", e);
                continue;
            }

            found += 1;
            if self.discovered.insert(&link) {
                new += 1;
            }

            if self.crawled.contains(&link) || link == current {
                continue;
            }

            if self.options.http_only && !is_http_like(&link) {
                tracing::debug!("Not queueing non-HTTP link: {}", link);
                continue;
            }

            self.queue.push(link);
        }

        (found, new)
    }

    fn page_limit_reached(&self) -> bool {
        self.options.max_pages > 0 && self.stats.pages_crawled as usize >= self.options.max_pages
    }

    /// URLs waiting to be crawled; the last entry is popped next
    pub fn queue(&self) -> &[String] {
        &self.queue
    }

    /// Every unique link discovered so far, in first-seen order
    pub fn discovered(&self) -> &[String] {
        self.discovered.as_slice()
    }

    /// Returns true if links have been extracted from the URL
    pub fn is_crawled(&self, url: &str) -> bool {
        self.crawled.contains(url)
    }

    /// Number of origins with a resolved robots policy
    pub fn origins_resolved(&self) -> usize {
        self.robots.len()
    }

    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the frontier, returning its sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}
