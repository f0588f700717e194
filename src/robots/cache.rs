//! Robots.txt caching
//!
//! One cache per crawl, keyed by host. Lookup is lazy: the first time a
//! host is considered, its robots.txt is fetched and the outcome memoized
//! for the rest of the run, including the failure case. Entries are never
//! refreshed within a run.

use crate::robots::{fetch_robots, ParsedRobots};
use crate::url::Address;
use std::collections::HashMap;
use std::time::Duration;

/// Per-host robots.txt cache
///
/// Owned and mutated by the scheduler task only, so no locking is needed.
/// An entry of `None` records a host whose robots.txt could not be fetched
/// or returned non-200; such hosts are treated as allow-all.
pub struct RobotsCache {
    client: reqwest::Client,
    entries: HashMap<String, Option<ParsedRobots>>,
}

impl RobotsCache {
    /// Creates a cache with its own HTTP client
    ///
    /// Unlike the page client, this one follows redirects and is not
    /// subject to the politeness gate.
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent.to_string())
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            entries: HashMap::new(),
        })
    }

    /// Answers whether the address may be fetched for the given agent
    ///
    /// Fetches and memoizes robots.txt for the address's host on first use.
    ///
    /// # Arguments
    ///
    /// * `address` - The candidate page address
    /// * `robots_agent` - The user agent token tested against the rules
    pub async fn allows(&mut self, address: &Address, robots_agent: &str) -> bool {
        if !self.entries.contains_key(&address.host) {
            let fetched = fetch_robots(&self.client, address).await;
            self.entries.insert(address.host.clone(), fetched);
        }

        match self.entries.get(&address.host) {
            Some(Some(robots)) => robots.is_allowed(&address.full, robots_agent),
            // Absent matcher: the fetch failed or returned non-200.
            _ => true,
        }
    }

    /// Number of hosts with a memoized entry
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any host has been looked up yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
