use crate::config::types::{Config, CrawlerConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.connections < 1 {
        return Err(ConfigError::Validation(format!(
            "connections must be >= 1, got {}",
            config.connections
        )));
    }

    validate_seed_url(&config.start)?;

    // Pattern lists are compiled once at crawl start; reject anything that
    // would fail there. A malformed wait-time is deliberately NOT an error:
    // it degrades to zero delay.
    for pattern in config.include.iter().chain(config.exclude.iter()) {
        regex::Regex::new(pattern).map_err(|e| {
            ConfigError::InvalidPattern(format!("pattern '{}': {}", pattern, e))
        })?;
    }

    Ok(())
}

/// Validates that the seed is an absolute http(s) URL
fn validate_seed_url(start: &str) -> Result<(), ConfigError> {
    let url = Url::parse(start)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid start URL '{}': {}", start, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Start URL '{}' must use an http or https scheme",
            start
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Start URL '{}' has no host",
            start
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.full.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent.full cannot be empty".to_string(),
        ));
    }

    if config.robots.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent.robots cannot be empty".to_string(),
        ));
    }

    Ok(())
}
