//! Newline-delimited URL lists
//!
//! Seed, ignore and output files all hold one URL per line, separated by the
//! platform line separator.

use std::io;
use std::path::Path;

/// Line separator used when splitting and joining URL lists
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";

/// Line separator used when splitting and joining URL lists
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Splits list content into entries, dropping empty lines
///
/// Lines are not trimmed: an entry must match a URL character for character.
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .split(LINE_SEPARATOR)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads a URL list file
pub fn read_url_list(path: &Path) -> io::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_url_list(&content))
}

/// Joins URLs into list content, one per line, without a trailing separator
pub fn join_url_list<'a, I>(urls: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    urls.into_iter().collect::<Vec<_>>().join(LINE_SEPARATOR)
}
