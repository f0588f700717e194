use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for sitewalk
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Seed URL to start crawling from (absolute)
    pub start: String,

    /// Maximum number of concurrent fetches; also sizes the HTTP
    /// connection pool and the result channel
    #[serde(default = "default_connections")]
    pub connections: usize,

    /// Minimum delay between successive dispatches, as a human-readable
    /// duration string such as "100ms" or "2s"
    #[serde(rename = "wait-time", default)]
    pub wait_time: String,

    /// Depth cap; negative means unbounded, 0 crawls only the seeds
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: i32,

    /// Regex patterns a URL must match to be crawled (when non-empty)
    #[serde(default)]
    pub include: Vec<String>,

    /// Regex patterns that exclude a URL from the crawl
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Drop links carrying rel="nofollow" instead of following them
    #[serde(rename = "respect-nofollow", default)]
    pub respect_nofollow: bool,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Full User-Agent header sent on page requests
    pub full: String,

    /// Token tested against robots.txt rules
    pub robots: String,
}

fn default_connections() -> usize {
    20
}

fn default_max_depth() -> i32 {
    -1
}

impl CrawlerConfig {
    /// Parses `wait-time` into a [`Duration`].
    ///
    /// An empty or malformed value degrades to zero delay rather than
    /// failing the crawl.
    pub fn wait_duration(&self) -> Duration {
        humantime::parse_duration(self.wait_time.trim()).unwrap_or(Duration::ZERO)
    }
}
