//! Link extraction
//!
//! Fetches a page and pulls crawlable anchor targets out of it. Results are
//! returned in document order and are neither deduplicated nor filtered by
//! robots policy; that is the frontier's job.

use crate::crawler::{fetch_url, FetchResult};
use crate::url::{parse_absolute, Origin};
use crate::UrlError;
use reqwest::Client;
use scraper::{Html, Selector};
use thiserror::Error;

/// Anchors with an href, except those marked as author or nofollow links
///
/// The `rel` comparison is on the whole attribute value, so
/// `rel="nofollow noopener"` is still followed.
const ANCHOR_SELECTOR: &str = r#"a[href]:not([rel="author"]):not([rel="nofollow"])"#;

/// Why links could not be extracted from a page
///
/// A page that was fetched but has no qualifying anchors is not an error; it
/// yields `Ok` with an empty list.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    InvalidUrl(#[from] UrlError),

    #[error("Unable to fetch {url}: status {status_code}")]
    Http { url: String, status_code: u16 },

    #[error("Fetch failed for {url}: {error}")]
    Network { url: String, error: String },
}

/// Fetches a page and extracts its anchor links
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The absolute URL of the page
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Links in document order, possibly empty
/// * `Err(ExtractError)` - The URL was invalid (no request is made) or the
///   fetch failed
pub async fn extract_links(client: &Client, url: &str) -> Result<Vec<String>, ExtractError> {
    let parsed = parse_absolute(url)?;
    let origin = Origin::from_url(&parsed)?;

    match fetch_url(client, url).await {
        FetchResult::Success {
            final_url,
            status_code,
            body,
        } => {
            tracing::debug!("Fetched {} ({}, {} bytes)", final_url, status_code, body.len());
            Ok(parse_links(&body, &origin))
        }
        FetchResult::HttpError { status_code } => Err(ExtractError::Http {
            url: url.to_string(),
            status_code,
        }),
        FetchResult::NetworkError { error } => Err(ExtractError::Network {
            url: url.to_string(),
            error,
        }),
    }
}

/// Extracts anchor links from HTML content
///
/// # Link Rules
///
/// - Anchors without an `href`, or with `rel="author"` / `rel="nofollow"`,
///   are not selected
/// - Hrefs that are blank or start with `#` are skipped
/// - Hrefs starting with `/` are prefixed with the page origin
/// - Everything else is passed through as written (`mailto:`, relative
///   paths and all)
///
/// # Example
///
/// ```
/// use sitewalk::crawler::parse_links;
/// use sitewalk::url::Origin;
///
/// let origin = Origin::parse("https://example.com/").unwrap();
/// let html = r##"<a href="/about">About</a><a href="#top">Top</a>"##;
/// assert_eq!(parse_links(html, &origin), vec!["https://example.com/about"]);
/// ```
pub fn parse_links(html: &str, origin: &Origin) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse(ANCHOR_SELECTOR) {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(link) = resolve_href(href, origin) {
                    links.push(link);
                }
            }
        }
    }

    links
}

fn resolve_href(href: &str, origin: &Origin) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with('/') {
        Some(origin.join_path(href))
    } else {
        Some(href.to_string())
    }
}
