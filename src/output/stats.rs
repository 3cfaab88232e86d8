//! Crawl statistics
//!
//! Counters kept by the frontier while it runs, logged as a summary once the
//! queue is exhausted.

use chrono::{DateTime, Duration, Utc};

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStats {
    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// When the queue was exhausted (or the page limit was hit)
    pub finished_at: Option<DateTime<Utc>>,

    /// Pages whose links were extracted
    pub pages_crawled: u64,

    /// Pages whose extraction failed (invalid URL, network, HTTP status)
    pub pages_failed: u64,

    /// Queue entries skipped because they are in the ignore list
    pub pages_ignored: u64,

    /// Queue entries skipped because no origin could be derived
    pub urls_skipped: u64,

    /// Distinct origins whose robots.txt was resolved
    pub origins_resolved: u64,

    /// Extracted links dropped by a disallow rule
    pub links_disallowed: u64,

    /// Size of the discovered set
    pub links_discovered: u64,
}

impl CrawlStats {
    /// Starts a new set of counters stamped with the current time
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_crawled: 0,
            pages_failed: 0,
            pages_ignored: 0,
            urls_skipped: 0,
            origins_resolved: 0,
            links_disallowed: 0,
            links_discovered: 0,
        }
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Elapsed time, up to now if the crawl has not finished
    pub fn duration(&self) -> Duration {
        self.finished_at.unwrap_or_else(Utc::now) - self.started_at
    }

    /// Logs a summary of the crawl
    pub fn log_summary(&self) {
        let elapsed = self.duration();
        let seconds = elapsed.num_milliseconds() as f64 / 1000.0;
        let rate = if seconds > 0.0 {
            self.pages_crawled as f64 / seconds
        } else {
            0.0
        };

        tracing::info!(
            "Crawl finished: {} pages crawled, {} failed, {} ignored, {} skipped in {:.1}s ({:.2} pages/sec)",
            self.pages_crawled,
            self.pages_failed,
            self.pages_ignored,
            self.urls_skipped,
            seconds,
            rate
        );
        tracing::info!(
            "{} origins resolved, {} links disallowed by robots.txt, {} URLs discovered",
            self.origins_resolved,
            self.links_disallowed,
            self.links_discovered
        );
    }
}

impl Default for CrawlStats {
    fn default() -> Self {
        Self::start()
    }
}
