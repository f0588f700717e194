//! Crawler module: scheduling, fetching, scraping, and result emission
//!
//! The entry points are [`crawl`] and [`crawl_list`]. Both spawn the
//! scheduler onto the current Tokio runtime and return a [`Crawl`] handle
//! immediately; network requests may begin before any result is requested.

mod fetcher;
mod frontier;
mod result;
mod scheduler;
mod scrape;

pub use frontier::FrontierEntry;
pub use result::{HeaderPair, Hreflang, Link, PageResult};

use crate::config::{validate, Config};
use crate::crawler::fetcher::FetchContext;
use crate::crawler::frontier::Frontier;
use crate::crawler::scheduler::Scheduler;
use crate::robots::RobotsCache;
use crate::url::{Address, UrlFilter};
use crate::SitewalkError;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Handle to a running crawl
///
/// Results are drained with [`Crawl::next`]. Dropping the handle closes
/// the channel; in-flight fetchers notice and wind down, so an abandoned
/// crawl does not keep requesting pages indefinitely.
pub struct Crawl {
    results: mpsc::Receiver<PageResult>,
}

impl Crawl {
    /// Returns the next result from the crawl
    ///
    /// Blocks until a result is available. Results come out ascending by
    /// depth; within one depth level the order depends on which fetches
    /// complete first. Returns `None` once the crawl has terminated and
    /// every result has been drained.
    pub async fn next(&mut self) -> Option<PageResult> {
        self.results.recv().await
    }
}

/// Starts a crawl seeded from `config.crawler.start`
///
/// # Arguments
///
/// * `config` - The crawl configuration; validated before anything runs
///
/// # Returns
///
/// * `Ok(Crawl)` - The crawl is running in the background
/// * `Err(SitewalkError)` - The configuration, seed URL, filter patterns,
///   or HTTP client construction failed; no crawl was started
///
/// # Example
///
/// ```no_run
/// use sitewalk::config::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let mut crawl = sitewalk::crawl(config)?;
/// while let Some(result) = crawl.next().await {
///     println!("{} {}", result.status_code, result.address);
/// }
/// # Ok(())
/// # }
/// ```
pub fn crawl(config: Config) -> Result<Crawl, SitewalkError> {
    let seed = Address::parse(&config.crawler.start)?;
    crawl_list(config, vec![seed])
}

/// Starts a crawl from an explicit seed list instead of the configured
/// start URL
///
/// Must be called from within a Tokio runtime. All seeds enter the crawl
/// at depth 0 and are marked seen before the first dispatch, so duplicate
/// seeds and links back to seeds are crawled at most once.
pub fn crawl_list(config: Config, seeds: Vec<Address>) -> Result<Crawl, SitewalkError> {
    validate(&config)?;

    let filter = UrlFilter::compile(&config.crawler.include, &config.crawler.exclude)?;
    let client = fetcher::build_page_client(&config)?;
    let robots = RobotsCache::new(&config.user_agent.full)?;

    let queue: VecDeque<FrontierEntry> = seeds
        .into_iter()
        .map(|address| FrontierEntry { address, depth: 0 })
        .collect();

    let mut frontier = Frontier::new();
    for entry in &queue {
        frontier.mark_seen(&entry.address.full);
    }

    // The channel is bounded by the connection cap: a slow consumer
    // backpressures fetchers rather than buffering the whole site.
    let (results_tx, results_rx) = mpsc::channel(config.crawler.connections.max(1));

    let ctx = Arc::new(FetchContext {
        client,
        filter,
        frontier: Mutex::new(frontier),
        results: results_tx,
        respect_nofollow: config.crawler.respect_nofollow,
    });

    let scheduler = Scheduler::new(&config, queue, ctx, robots);
    tokio::spawn(scheduler.run());

    Ok(Crawl {
        results: results_rx,
    })
}
