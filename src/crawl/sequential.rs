// src/crawl/sequential.rs
// =============================================================================
// The single-threaded crawl engine.
//
// How it works:
// 1. Compute the deadline once: now + timeout
// 2. Push the seeds on a stack of (url, depth) with depth = max_depth
// 3. Pop a page, parse it, add its words, then push its links with
//    depth - 1. Links go on in reverse so the first link is popped next,
//    finishing one link's whole subtree before the next link
//
// The stack lives on the heap, so a long chain of links cannot overflow
// the thread's call stack.
//
// Because adding counts is order-independent, the result is the same as the
// parallel engine's even though the visiting order differs.
// =============================================================================

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use log::{debug, info};

use super::{fetch_page, Clock, CrawlPolicy, CrawlResult, Deadline, WebCrawler};
use crate::parser::PageParser;

/// Crawls one page at a time on the calling thread.
pub struct SequentialCrawler {
    policy: CrawlPolicy,
    parser: Arc<dyn PageParser>,
    clock: Arc<dyn Clock>,
}

// State owned by a single crawl() call
struct Visit<'a> {
    crawler: &'a SequentialCrawler,
    deadline: Deadline,
    visited: HashSet<String>,
    counts: HashMap<String, u64>,
    pending: Vec<(String, usize)>,
}

impl SequentialCrawler {
    pub fn new(policy: CrawlPolicy, parser: Arc<dyn PageParser>, clock: Arc<dyn Clock>) -> Self {
        Self {
            policy,
            parser,
            clock,
        }
    }
}

impl WebCrawler for SequentialCrawler {
    fn crawl(&self, seeds: &[String]) -> CrawlResult {
        let mut visit = Visit {
            crawler: self,
            deadline: Deadline::after(self.clock.as_ref(), self.policy.timeout),
            visited: HashSet::new(),
            counts: HashMap::new(),
            pending: Vec::new(),
        };

        visit.push_all(seeds.iter().cloned(), self.policy.max_depth);
        visit.run();

        info!(
            "Sequential crawl finished: {} page(s), {} distinct word(s)",
            visit.visited.len(),
            visit.counts.len()
        );

        CrawlResult::from_counts(
            &visit.counts,
            self.policy.popular_word_count,
            visit.visited.len(),
        )
    }
}

impl Visit<'_> {
    fn push_all<I>(&mut self, urls: I, depth: usize)
    where
        I: DoubleEndedIterator<Item = String>,
    {
        self.pending.extend(urls.rev().map(|url| (url, depth)));
    }

    fn run(&mut self) {
        while let Some((url, depth)) = self.pending.pop() {
            self.page(url, depth);
        }
    }

    fn page(&mut self, url: String, depth: usize) {
        let crawler = self.crawler;

        if depth == 0 || self.deadline.has_passed(crawler.clock.as_ref()) {
            return;
        }

        if crawler.policy.is_ignored(&url) {
            debug!("Ignoring {}", url);
            return;
        }

        // insert() returns false if the URL was already claimed
        if !self.visited.insert(url.clone()) {
            return;
        }

        debug!("Crawling [depth {}]: {}", depth, url);
        let page = fetch_page(crawler.parser.as_ref(), &url);

        for (word, count) in page.word_counts {
            *self.counts.entry(word).or_insert(0) += count;
        }

        self.push_all(page.links.into_iter(), depth - 1);
    }
}
