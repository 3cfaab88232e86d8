//! Output module for persisting discovered links and crawl statistics
//!
//! This module handles:
//! - The `LinkSink` trait the frontier persists through
//! - Writing the discovered-links file (full overwrite, one URL per line)
//! - Recording and logging crawl statistics

mod file;
pub mod stats;
mod traits;

pub use file::FileSink;
pub use stats::CrawlStats;
pub use traits::{LinkSink, MemorySink, OutputError, OutputResult};
