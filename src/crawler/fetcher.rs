//! HTTP fetching
//!
//! One fetch task per dispatched URL: a single GET, scrape, frontier
//! merge, and result emission. The page client never follows redirects; a
//! 3xx response is recorded as-is and its Location target becomes an
//! ordinary next-level link.
//!
//! Failures are silent by design. A network error, an unreadable body, or
//! a non-UTF-8 body drops the URL from the crawl without emitting a
//! result; the connection permit is released and the level barrier still
//! observes the task's completion.

use crate::config::Config;
use crate::crawler::frontier::{Frontier, FrontierEntry};
use crate::crawler::result::{HeaderPair, Link, PageResult};
use crate::crawler::scrape;
use reqwest::header::{HeaderMap, LOCATION};
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode, Version};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::{Mutex, OwnedSemaphorePermit};

/// Shared context handed to every fetch task of a crawl
pub(crate) struct FetchContext {
    pub(crate) client: Client,
    pub(crate) filter: crate::url::UrlFilter,
    pub(crate) frontier: Mutex<Frontier>,
    pub(crate) results: mpsc::Sender<PageResult>,
    pub(crate) respect_nofollow: bool,
}

/// Builds the shared page client
///
/// One client per crawl; the pool is sized to the connection cap with a
/// 30 second idle timeout, and redirect following is disabled so the
/// scheduler sees 3xx responses.
pub(crate) fn build_page_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.full.clone())
        .redirect(Policy::none())
        .http1_only()
        .pool_max_idle_per_host(config.crawler.connections.max(1))
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(30))
        .build()
}

/// Fetches one frontier entry and emits at most one result
///
/// The permit is released on every exit path by drop, so the connection
/// cap recovers from silent drops as well as successes.
pub(crate) async fn fetch_entry(
    ctx: Arc<FetchContext>,
    entry: FrontierEntry,
    permit: OwnedSemaphorePermit,
) {
    let _permit = permit;

    let response = match ctx.client.get(&entry.address.full).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!(url = %entry.address, error = %e, "fetch failed, dropping");
            return;
        }
    };

    let status = response.status();
    let version = response.version();
    let headers = response.headers().clone();

    let body = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(url = %entry.address, error = %e, "body read failed, dropping");
            return;
        }
    };
    let body = match String::from_utf8(body.to_vec()) {
        Ok(body) => body,
        Err(_) => {
            tracing::debug!(url = %entry.address, "body is not valid UTF-8, dropping");
            return;
        }
    };

    // Scraping is synchronous; the parsed tree never crosses an await.
    let page = scrape::scrape_page(&body, &entry.address);

    let mut result = hydrate(&entry, status, version, &headers, page);

    if status.is_redirection() {
        // The frontier follows the redirect as a normal next-depth link
        // instead of the page's own body links.
        let location = headers
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");
        let target = entry.address.join(location);
        if let Some(target) = &target {
            result.resolves_to = target.clone();
        }
        result.links = vec![Link {
            target,
            text: String::new(),
            nofollow: false,
        }];
    }

    ctx.frontier.lock().await.merge(
        &result.links,
        entry.depth + 1,
        &ctx.filter,
        ctx.respect_nofollow,
    );

    // A closed channel means the consumer dropped the crawl handle; the
    // result is discarded and the task winds down normally.
    let _ = ctx.results.send(result).await;
}

/// Populates a result from the response and the scraped page content
fn hydrate(
    entry: &FrontierEntry,
    status: StatusCode,
    version: Version,
    headers: &HeaderMap,
    page: scrape::ScrapedPage,
) -> PageResult {
    let (proto, proto_major, proto_minor) = proto_parts(version);

    // keys() yields each distinct header name once; get() returns its
    // first value.
    let header = headers
        .keys()
        .filter_map(|name| {
            headers.get(name).map(|value| HeaderPair {
                key: name.as_str().to_string(),
                val: String::from_utf8_lossy(value.as_bytes()).into_owned(),
            })
        })
        .collect();

    PageResult {
        depth: entry.depth,
        description: page.description,
        title: page.title,
        h1: page.h1,
        robots: page.robots,
        canonical: page.canonical,
        status: status_line(status),
        status_code: status.as_u16(),
        proto: proto.to_string(),
        proto_major,
        proto_minor,
        header,
        links: page.links,
        hreflang: page.hreflang,
        address: entry.address.clone(),
        resolves_to: entry.address.clone(),
    }
}

/// Status line text in the "200 OK" form
fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

fn proto_parts(version: Version) -> (&'static str, u16, u16) {
    match version {
        Version::HTTP_09 => ("HTTP/0.9", 0, 9),
        Version::HTTP_10 => ("HTTP/1.0", 1, 0),
        Version::HTTP_11 => ("HTTP/1.1", 1, 1),
        Version::HTTP_2 => ("HTTP/2.0", 2, 0),
        Version::HTTP_3 => ("HTTP/3.0", 3, 0),
        _ => ("", 0, 0),
    }
}
