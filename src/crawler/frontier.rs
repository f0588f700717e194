//! Frontier state: the seen-set and the next-level queue
//!
//! Concurrent fetchers merge their discovered links here while the
//! scheduler drains the current level. A single mutex around the whole
//! structure keeps the seen-check and the enqueue atomic, which is what
//! prevents two fetchers from both claiming an unseen URL.

use crate::crawler::result::Link;
use crate::url::{Address, UrlFilter};

/// The unit of work in both level queues
#[derive(Debug, Clone)]
pub struct FrontierEntry {
    pub address: Address,
    pub depth: i32,
}

/// Seen-set plus the queue for the next BFS level
///
/// Once a URL enters the seen-set it is never enqueued again, which is how
/// cyclic link graphs terminate.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    seen: std::collections::HashSet<String>,
    next: Vec<FrontierEntry>,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Seeds the seen-set before the crawl starts
    ///
    /// Seed URLs are marked seen up front so that links back to them found
    /// during the crawl are not enqueued a second time.
    pub(crate) fn mark_seen(&mut self, full_url: &str) {
        self.seen.insert(full_url.to_string());
    }

    /// Merges one fetcher's link list into the next level
    ///
    /// Links are dropped when the target is unresolved, rejected by the
    /// filter, already seen, or nofollow while nofollow is respected.
    /// Survivors are marked seen and appended at the given depth.
    pub(crate) fn merge(
        &mut self,
        links: &[Link],
        depth: i32,
        filter: &UrlFilter,
        respect_nofollow: bool,
    ) {
        for link in links {
            let Some(target) = &link.target else {
                continue;
            };
            if !filter.allows(&target.full) {
                continue;
            }
            if link.nofollow && respect_nofollow {
                continue;
            }
            if self.seen.insert(target.full.clone()) {
                self.next.push(FrontierEntry {
                    address: target.clone(),
                    depth,
                });
            }
        }
    }

    /// Takes the accumulated next level, leaving the queue empty
    pub(crate) fn take_next(&mut self) -> Vec<FrontierEntry> {
        std::mem::take(&mut self.next)
    }
}
