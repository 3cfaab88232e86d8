//! Output sink trait and error types
//!
//! The frontier hands its full discovered set to a sink after every
//! successfully crawled page. Each call replaces whatever was persisted
//! before.

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for the cumulative discovered-link set
pub trait LinkSink {
    /// Replaces the persisted list with `links`, in the given order
    fn persist(&mut self, links: &[String]) -> OutputResult<()>;
}

impl<S: LinkSink + ?Sized> LinkSink for &mut S {
    fn persist(&mut self, links: &[String]) -> OutputResult<()> {
        (**self).persist(links)
    }
}

/// In-memory sink that keeps every snapshot it receives
///
/// Useful for embedding the crawler without touching the filesystem, and for
/// observing how the discovered set grows page by page.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    snapshots: Vec<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All snapshots, oldest first
    pub fn snapshots(&self) -> &[Vec<String>] {
        &self.snapshots
    }

    /// The most recent snapshot, if anything was persisted
    pub fn latest(&self) -> Option<&[String]> {
        self.snapshots.last().map(Vec::as_slice)
    }
}

impl LinkSink for MemorySink {
    fn persist(&mut self, links: &[String]) -> OutputResult<()> {
        self.snapshots.push(links.to_vec());
        Ok(())
    }
}
