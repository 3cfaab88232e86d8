//! Robots.txt handling module
//!
//! This module fetches an origin's robots.txt and reduces it to allow and
//! disallow URL lists. Resolution never fails: any fetch problem yields an
//! empty policy.

mod cache;
mod policy;

pub use cache::RobotsCache;
pub use policy::RobotsPolicy;

use crate::crawler::{fetch_url, FetchResult};
use crate::url::Origin;
use reqwest::Client;

/// Fetches and parses robots.txt for an origin
///
/// Issues exactly one GET to `{origin}/robots.txt`. Network failures and
/// non-success statuses are logged and degrade to [`RobotsPolicy::empty`].
/// Callers are responsible for caching the result.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `origin` - The origin whose robots.txt should be fetched
pub async fn resolve(client: &Client, origin: &Origin) -> RobotsPolicy {
    let robots_url = origin.robots_url();
    tracing::debug!("Fetching robots.txt from: {}", robots_url);

    let policy = match fetch_url(client, &robots_url).await {
        FetchResult::Success { body, .. } => RobotsPolicy::parse(origin, &body),
        FetchResult::HttpError { status_code } => {
            tracing::error!("Unable to fetch {}: status {}", robots_url, status_code);
            RobotsPolicy::empty()
        }
        FetchResult::NetworkError { error } => {
            tracing::error!("Fetch failed for {}: {}", robots_url, error);
            RobotsPolicy::empty()
        }
    };

    tracing::info!("Allowing: {}", policy.allow.join(","));
    tracing::info!("Disallowing: {}", policy.disallow.join(","));

    policy
}
