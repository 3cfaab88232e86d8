//! URL handling module for Sitewalk
//!
//! This module provides origin derivation (the robots cache key) and the
//! newline-delimited URL list format used for seed, ignore and output files.

mod list;
mod origin;

pub use list::{join_url_list, parse_url_list, read_url_list, LINE_SEPARATOR};
pub use origin::Origin;

use crate::{UrlError, UrlResult};
use url::Url;

/// Parses an absolute URL, keeping the offending input in the error
///
/// # Examples
///
/// ```
/// use sitewalk::url::parse_absolute;
///
/// assert!(parse_absolute("https://example.com/about").is_ok());
/// assert!(parse_absolute("/about").is_err());
/// ```
pub fn parse_absolute(input: &str) -> UrlResult<Url> {
    Url::parse(input).map_err(|source| UrlError::Parse {
        url: input.to_string(),
        source,
    })
}

/// Returns true if the URL string carries an http or https scheme
pub fn is_http_like(input: &str) -> bool {
    parse_absolute(input)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}
