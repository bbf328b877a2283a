// src/crawl/parallel.rs
// =============================================================================
// The multi-threaded crawl engine.
//
// How it works:
// - Every seed becomes a task on a fixed pool of worker threads
// - A task parses its page, then spawns a child task for every link into
//   the same scope and returns without waiting for them
// - crawl() returns once the scope is empty, i.e. the whole task tree has
//   finished
//
// Two structures are shared by all tasks of one crawl() call:
// - visited: DashSet, insert() is an atomic "claim if nobody has yet"
// - counts: DashMap, entry() locks one shard while a word count is bumped
//
// There is no cancellation. Each task checks the deadline itself before
// doing any work, so tasks spawned after the deadline finish immediately.
// =============================================================================

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::{DashMap, DashSet};
use log::{debug, info};
use rayon::ThreadPoolBuildError;

use super::{
    fetch_page, Clock, CrawlPolicy, CrawlResult, Deadline, RayonSpawner, Task, TaskScope, TaskSpawner,
    WebCrawler,
};
use crate::parser::PageParser;

/// Crawls many pages at once on a dedicated worker pool.
pub struct ParallelCrawler {
    policy: CrawlPolicy,
    parser: Arc<dyn PageParser>,
    clock: Arc<dyn Clock>,
    spawner: Box<dyn TaskSpawner>,
}

// Everything a task needs, borrowed for the duration of one crawl() call
struct CrawlContext<'a> {
    crawler: &'a ParallelCrawler,
    deadline: Deadline,
    visited: DashSet<String>,
    counts: DashMap<String, u64>,
}

impl ParallelCrawler {
    /// Creates a crawler with `min(target parallelism, CPU count)` workers.
    pub fn new(
        policy: CrawlPolicy,
        parser: Arc<dyn PageParser>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ThreadPoolBuildError> {
        let threads = policy.target_parallelism.min(num_cpus::get()).max(1);
        let spawner = RayonSpawner::new(threads)?;
        debug!("Parallel crawler using {} worker thread(s)", threads);

        Ok(Self::with_spawner(policy, parser, clock, Box::new(spawner)))
    }

    /// Creates a crawler on top of any task spawner.
    pub fn with_spawner(
        policy: CrawlPolicy,
        parser: Arc<dyn PageParser>,
        clock: Arc<dyn Clock>,
        spawner: Box<dyn TaskSpawner>,
    ) -> Self {
        Self {
            policy,
            parser,
            clock,
            spawner,
        }
    }
}

impl WebCrawler for ParallelCrawler {
    fn crawl(&self, seeds: &[String]) -> CrawlResult {
        let context = CrawlContext {
            crawler: self,
            deadline: Deadline::after(self.clock.as_ref(), self.policy.timeout),
            visited: DashSet::new(),
            counts: DashMap::new(),
        };

        let tasks = seeds
            .iter()
            .map(|seed| context.task(seed.clone(), self.policy.max_depth))
            .collect();
        self.spawner.run(tasks);

        let counts: HashMap<String, u64> = context.counts.into_iter().collect();
        info!(
            "Parallel crawl finished: {} page(s), {} distinct word(s)",
            context.visited.len(),
            counts.len()
        );

        CrawlResult::from_counts(&counts, self.policy.popular_word_count, context.visited.len())
    }

    fn max_parallelism(&self) -> usize {
        self.spawner.parallelism()
    }
}

impl CrawlContext<'_> {
    fn task<'s>(&'s self, url: String, depth: usize) -> Task<'s> {
        Box::new(move |scope: &dyn TaskScope<'s>| self.visit(scope, &url, depth))
    }

    fn visit<'s>(&'s self, scope: &dyn TaskScope<'s>, url: &str, depth: usize) {
        let crawler = self.crawler;

        if depth == 0 || self.deadline.has_passed(crawler.clock.as_ref()) {
            return;
        }

        if crawler.policy.is_ignored(url) {
            debug!("Ignoring {}", url);
            return;
        }

        // Exactly one task wins the claim for a URL, the rest stop here
        if !self.visited.insert(url.to_string()) {
            return;
        }

        debug!("Crawling [depth {}]: {}", depth, url);
        let page = fetch_page(crawler.parser.as_ref(), url);

        for (word, count) in page.word_counts {
            *self.counts.entry(word).or_insert(0) += count;
        }

        for link in page.links {
            scope.spawn(self.task(link, depth - 1));
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is DashSet / DashMap?
//    - Like HashSet / HashMap, but many threads can use them at once
//    - Internally split into shards, each with its own lock
//    - insert() on a DashSet returns false if the value was already there,
//      in one step, so two threads can never both "win" the same URL
//
// 2. Why `*counts.entry(word).or_insert(0) += count`?
//    - entry() holds the shard lock until the statement ends
//    - So reading the old count and writing the new one cannot be split
//      by another thread (no lost updates)
//
// 3. Why does CrawlContext borrow instead of using Arc?
//    - run() only returns after every task, spawned ones included, has finished
//    - So the tasks can safely borrow data that lives on crawl()'s stack
//    - The compiler checks this through the 'scope lifetime on Task
//
// 4. What happens after the deadline?
//    - Nothing is cancelled: pages being parsed are allowed to finish
//    - But every new task checks the clock first and returns immediately
// -----------------------------------------------------------------------------
