//! Robots.txt handling module
//!
//! This module fetches, parses, and caches robots.txt files per host. Any
//! failure along the way (network error, non-200 status, unreadable body)
//! is treated as permissive: the host is crawled as if no robots.txt
//! existed.

mod cache;
mod parser;

pub use cache::RobotsCache;
pub use parser::ParsedRobots;

use crate::url::Address;

/// Fetches and parses robots.txt for an address's origin
///
/// The fetch uses the provided client, which follows redirects and is not
/// subject to the crawl's politeness gate.
///
/// # Returns
///
/// * `Some(ParsedRobots)` - A 200 response with a readable body
/// * `None` - Anything else; the host is treated as allow-all
pub(crate) async fn fetch_robots(
    client: &reqwest::Client,
    address: &Address,
) -> Option<ParsedRobots> {
    let robots_url = address.robots_url();

    tracing::debug!("Fetching robots.txt from {}", robots_url);

    match client.get(&robots_url).send().await {
        Ok(response) if response.status() == reqwest::StatusCode::OK => {
            match response.text().await {
                Ok(content) => Some(ParsedRobots::from_content(&content)),
                Err(e) => {
                    tracing::warn!("Failed to read robots.txt body from {}: {}", robots_url, e);
                    None
                }
            }
        }
        Ok(response) => {
            tracing::debug!(
                "robots.txt at {} returned status {}, allowing all",
                robots_url,
                response.status()
            );
            None
        }
        Err(e) => {
            tracing::debug!("Failed to fetch robots.txt from {}: {}, allowing all", robots_url, e);
            None
        }
    }
}
