//! sitewalk: a breadth-first site crawler
//!
//! This crate implements a level-synchronous crawler: pages are fetched one
//! BFS level at a time, concurrently up to a connection cap, while a global
//! inter-request delay and per-host robots.txt rules keep the crawl polite.
//! Results come out of a single channel in non-decreasing depth order.

pub mod config;
pub mod crawler;
pub mod robots;
pub mod url;

use thiserror::Error;

/// Main error type for sitewalk operations
///
/// Per-URL failures (network errors, unparseable bodies) never surface here;
/// they silently remove the URL from the crawl. This type covers the
/// out-of-band failures that prevent a crawl from starting at all.
#[derive(Debug, Error)]
pub enum SitewalkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Invalid filter pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for sitewalk operations
pub type Result<T> = std::result::Result<T, SitewalkError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, crawl_list, Crawl, HeaderPair, Hreflang, Link, PageResult};
pub use url::{Address, UrlFilter};
