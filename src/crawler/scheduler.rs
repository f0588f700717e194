//! Level-synchronous crawl scheduling
//!
//! The scheduler is a single-threaded state machine that drains the
//! current BFS level, dispatching fetch tasks under the politeness gate
//! (connection semaphore plus global inter-request delay) and the robots
//! gate. When the level is empty it waits for every outstanding fetcher to
//! finish merging, promotes the next-level queue, and goes again. An empty
//! promoted queue terminates the crawl; dropping the result sender closes
//! the channel behind the last result.
//!
//! Only fetch tasks run in parallel. The robots cache and the dispatch
//! clock are touched exclusively from this task, so neither needs a lock.

use crate::config::Config;
use crate::crawler::fetcher::{self, FetchContext};
use crate::crawler::frontier::FrontierEntry;
use crate::crawler::result::PageResult;
use crate::robots::RobotsCache;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::sleep;

/// States of the crawl machine
///
/// Transitions are computed in [`Scheduler::run`]; each state re-examines
/// the head of the queue rather than carrying it along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Decide between working the queue and ending the level
    StartQueue,
    /// Examine the head entry against the delay, depth cap, and filter
    PickNext,
    /// Sleep out the remainder of the inter-request delay
    Wait,
    /// Consult (and lazily populate) the robots cache for the head entry
    RobotsCheck,
    /// Acquire a connection permit and spawn a fetcher for the head entry
    Dispatch,
    /// Drop the head entry without fetching it
    Skip,
    /// Wait for the level's fetchers, then swap in the next-level queue
    Promote,
}

pub(crate) struct Scheduler {
    ctx: Arc<FetchContext>,
    robots: RobotsCache,
    robots_agent: String,
    queue: VecDeque<FrontierEntry>,
    level: i32,
    max_depth: i32,
    wait: Duration,
    last_dispatch: Option<Instant>,
    connections: Arc<Semaphore>,
    tasks: JoinSet<()>,
}

impl Scheduler {
    /// Creates a scheduler over an already-seeded queue
    ///
    /// The caller seeds the frontier's seen-set with the queue contents
    /// before constructing the context; nothing here re-checks that.
    pub(crate) fn new(
        config: &Config,
        queue: VecDeque<FrontierEntry>,
        ctx: Arc<FetchContext>,
        robots: RobotsCache,
    ) -> Self {
        Self {
            ctx,
            robots,
            robots_agent: config.user_agent.robots.clone(),
            queue,
            level: 0,
            max_depth: config.crawler.max_depth,
            wait: config.crawler.wait_duration(),
            last_dispatch: None,
            connections: Arc::new(Semaphore::new(config.crawler.connections.max(1))),
            tasks: JoinSet::new(),
        }
    }

    /// Runs the machine to termination
    pub(crate) async fn run(mut self) {
        tracing::info!(
            seeds = self.queue.len(),
            max_depth = self.max_depth,
            wait_ms = self.wait.as_millis() as u64,
            "crawl started"
        );

        let mut state = State::StartQueue;
        loop {
            state = match state {
                State::StartQueue => {
                    if self.ctx.results.is_closed() {
                        // The consumer dropped the crawl handle; stop
                        // producing work.
                        tracing::debug!("result channel closed, stopping crawl");
                        return;
                    }
                    if self.queue.is_empty() {
                        State::Promote
                    } else {
                        State::PickNext
                    }
                }

                State::PickNext => match self.queue.front() {
                    None => State::StartQueue,
                    Some(entry) => {
                        if self.remaining_wait().is_some() {
                            State::Wait
                        } else if self.max_depth >= 0 && entry.depth > self.max_depth {
                            State::Skip
                        } else if entry.depth > 0 && !self.ctx.filter.allows(&entry.address.full) {
                            // Seeds bypass the filter: the operator asked
                            // for them explicitly.
                            State::Skip
                        } else {
                            State::RobotsCheck
                        }
                    }
                },

                State::Wait => {
                    if let Some(remaining) = self.remaining_wait() {
                        sleep(remaining).await;
                    }
                    State::PickNext
                }

                State::RobotsCheck => match self.queue.front().cloned() {
                    None => State::StartQueue,
                    Some(entry) => {
                        if self.robots.allows(&entry.address, &self.robots_agent).await {
                            State::Dispatch
                        } else {
                            tracing::debug!(url = %entry.address, "blocked by robots.txt");
                            let blocked = PageResult::robots_blocked(entry.address, entry.depth);
                            if self.ctx.results.send(blocked).await.is_err() {
                                // Consumer dropped the crawl handle.
                                return;
                            }
                            State::Skip
                        }
                    }
                },

                State::Dispatch => {
                    let Ok(permit) = Arc::clone(&self.connections).acquire_owned().await else {
                        return;
                    };
                    self.last_dispatch = Some(Instant::now());
                    if let Some(entry) = self.queue.pop_front() {
                        tracing::debug!(url = %entry.address, depth = entry.depth, "dispatching");
                        let ctx = Arc::clone(&self.ctx);
                        self.tasks.spawn(fetcher::fetch_entry(ctx, entry, permit));
                    }
                    State::StartQueue
                }

                State::Skip => {
                    self.queue.pop_front();
                    State::StartQueue
                }

                State::Promote => {
                    // Level barrier: promotion may only happen after every
                    // fetcher of this level has completed its merge.
                    while self.tasks.join_next().await.is_some() {}

                    let next = self.ctx.frontier.lock().await.take_next();
                    self.level += 1;
                    if next.is_empty() {
                        tracing::info!(levels = self.level, "crawl finished");
                        return;
                    }
                    tracing::debug!(level = self.level, urls = next.len(), "promoting next level");
                    self.queue = VecDeque::from(next);
                    State::StartQueue
                }
            };
        }
    }

    /// Time left before the next dispatch is allowed, if any
    fn remaining_wait(&self) -> Option<Duration> {
        if self.wait.is_zero() {
            return None;
        }
        let last = self.last_dispatch?;
        self.wait.checked_sub(last.elapsed()).filter(|d| !d.is_zero())
    }
}
