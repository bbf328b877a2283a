// src/crawl/mod.rs
// =============================================================================
// This module is the crawl engine.
//
// Starting from a list of seed URLs, the engine:
// 1. Checks the depth limit, the deadline and the ignored URL patterns
// 2. Claims the URL so no other task parses it again
// 3. Asks the page parser for the page's words and links
// 4. Adds the words to a shared word-count map
// 5. Repeats for every link, one level less deep
//
// There are two engines with the same results:
// - sequential: one page at a time, depth-first, on the calling thread
// - parallel: every link becomes a task on a fixed pool of worker threads
//
// Rust concepts:
// - Traits: WebCrawler is implemented by both engines
// - Box<dyn Trait>: Pick an engine at runtime
// - Arc: Share the parser and clock with the engine
// =============================================================================

mod clock;
mod parallel;
mod policy;
mod ranking;
mod result;
mod sequential;
mod spawner;

use std::sync::Arc;

use anyhow::{Context, Result};
use log::warn;

use crate::config::Strategy;
use crate::parser::{short_type_name, PageContent, PageParser};

pub use clock::{Clock, Deadline, SystemClock};
pub use parallel::ParallelCrawler;
pub use policy::CrawlPolicy;
pub use result::CrawlResult;
pub use sequential::SequentialCrawler;
pub use spawner::{RayonSpawner, Task, TaskScope, TaskSpawner};

/// A crawl engine: visits pages from some seeds and reports popular words.
pub trait WebCrawler: Send + Sync {
    /// Crawls from `seeds` and returns the aggregated result.
    ///
    /// Never fails: pages that cannot be parsed are counted as visited but
    /// contribute no words and no links.
    fn crawl(&self, seeds: &[String]) -> CrawlResult;

    /// How many pages this engine may parse at the same time.
    fn max_parallelism(&self) -> usize {
        1
    }

    /// Short name used when reporting timings for this crawler.
    fn name(&self) -> &'static str {
        short_type_name::<Self>()
    }
}

/// Builds the crawler for `strategy`.
pub fn build_crawler(
    strategy: Strategy,
    policy: CrawlPolicy,
    parser: Arc<dyn PageParser>,
    clock: Arc<dyn Clock>,
) -> Result<Box<dyn WebCrawler>> {
    let crawler: Box<dyn WebCrawler> = match strategy {
        Strategy::Sequential => Box::new(SequentialCrawler::new(policy, parser, clock)),
        Strategy::Parallel => Box::new(
            ParallelCrawler::new(policy, parser, clock)
                .context("Failed to start the crawl worker pool")?,
        ),
    };
    Ok(crawler)
}

// Parses one page, turning a failure into "no words, no links"
//
// A broken page must never stop the rest of the crawl, so the error is only
// logged here.
fn fetch_page(parser: &dyn PageParser, url: &str) -> PageContent {
    match parser.parse(url) {
        Ok(page) => page,
        Err(e) => {
            warn!("Failed to parse {}: {}", url, e);
            PageContent::default()
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! An in-memory web and a clock that only moves when told to.

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    use super::{Clock, CrawlPolicy};
    use crate::parser::{PageContent, PageParser, ParseError};

    /// A clock starting at a fixed instant. Every `now()` call moves it
    /// forward by `tick`.
    pub struct FakeClock {
        start: Instant,
        elapsed_nanos: AtomicU64,
        tick_nanos: u64,
    }

    impl FakeClock {
        pub fn frozen() -> Self {
            Self::ticking(Duration::ZERO)
        }

        pub fn ticking(tick: Duration) -> Self {
            Self {
                start: Instant::now(),
                elapsed_nanos: AtomicU64::new(0),
                tick_nanos: tick.as_nanos() as u64,
            }
        }

        pub fn advance(&self, by: Duration) {
            self.elapsed_nanos
                .fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> Instant {
            let nanos = self.elapsed_nanos.fetch_add(self.tick_nanos, Ordering::SeqCst);
            self.start + Duration::from_nanos(nanos)
        }
    }

    /// A parser over a hand-written set of pages. Unknown URLs fail with a
    /// 404, and every call is counted.
    #[derive(Default)]
    pub struct FakeWeb {
        pages: HashMap<String, PageContent>,
        calls: Mutex<HashMap<String, usize>>,
        clock: Option<(Arc<FakeClock>, Duration)>,
    }

    impl FakeWeb {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn page(mut self, url: &str, words: &[(&str, u64)], links: &[&str]) -> Self {
            self.pages.insert(
                url.to_string(),
                PageContent {
                    word_counts: words.iter().map(|(w, c)| (w.to_string(), *c)).collect(),
                    links: links.iter().map(|l| l.to_string()).collect(),
                },
            );
            self
        }

        /// Every parse moves `clock` forward by `cost`.
        pub fn with_parse_cost(mut self, clock: Arc<FakeClock>, cost: Duration) -> Self {
            self.clock = Some((clock, cost));
            self
        }

        pub fn calls(&self, url: &str) -> usize {
            self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
        }

        pub fn total_calls(&self) -> usize {
            self.calls.lock().unwrap().values().sum()
        }
    }

    impl PageParser for FakeWeb {
        fn parse(&self, url: &str) -> Result<PageContent, ParseError> {
            *self.calls.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;

            if let Some((clock, cost)) = &self.clock {
                clock.advance(*cost);
            }

            self.pages.get(url).cloned().ok_or_else(|| ParseError::Status {
                url: url.to_string(),
                status: reqwest::StatusCode::NOT_FOUND,
            })
        }
    }

    pub fn policy(max_depth: usize) -> CrawlPolicy {
        CrawlPolicy {
            max_depth,
            timeout: Duration::from_secs(60),
            popular_word_count: 10,
            ignored_urls: Vec::new(),
            target_parallelism: 4,
        }
    }

    pub fn seeds(urls: &[&str]) -> Vec<String> {
        urls.iter().map(|u| u.to_string()).collect()
    }

    /// A site where A links to B and C, and both B and C link to D.
    pub fn diamond() -> FakeWeb {
        FakeWeb::new()
            .page("https://a.test", &[("alpha", 1), ("shared", 1)], &["https://b.test", "https://c.test"])
            .page("https://b.test", &[("beta", 2), ("shared", 1)], &["https://d.test"])
            .page("https://c.test", &[("gamma", 3), ("shared", 1)], &["https://d.test"])
            .page("https://d.test", &[("delta", 4), ("shared", 1)], &["https://a.test"])
    }

    /// A bigger site with cycles, shared pages and a dead link. Only crawl it
    /// with a depth of 1 or one larger than its size: in between, which pages
    /// get expanded depends on which path claims a page first.
    pub fn tangled_web() -> FakeWeb {
        let mut web = FakeWeb::new();
        for i in 0..40 {
            let url = format!("https://site.test/{i}");
            let word = format!("word{}", i % 7);
            let links = [
                format!("https://site.test/{}", (i * 3 + 1) % 40),
                format!("https://site.test/{}", (i * 7 + 2) % 40),
                format!("https://site.test/{}", i / 2),
                "https://site.test/missing".to_string(),
            ];
            let links: Vec<&str> = links.iter().map(String::as_str).collect();
            web = web.page(&url, &[(word.as_str(), (i % 5 + 1) as u64), ("common", 1)], &links);
        }
        web
    }

    /// Pages in layers: every link goes from layer n to layer n + 1, so every
    /// path to a page has the same length and any depth gives one answer.
    pub fn layered_web() -> FakeWeb {
        const LAYERS: usize = 5;
        const WIDTH: usize = 6;

        let mut web = FakeWeb::new();
        for layer in 0..LAYERS {
            for i in 0..WIDTH {
                let url = format!("https://layer.test/{layer}/{i}");
                let word = format!("w{}", (layer + i) % 4);
                let next = layer + 1;
                let links = [
                    format!("https://layer.test/{next}/{i}"),
                    format!("https://layer.test/{next}/{}", (i + 1) % WIDTH),
                    format!("https://layer.test/{next}/{}", (2 * i) % WIDTH),
                    format!("https://layer.test/{next}/missing"),
                ];
                let links: Vec<&str> = links.iter().map(String::as_str).collect();
                web = web.page(&url, &[(word.as_str(), (i + 1) as u64), ("layer", 1)], &links);
            }
        }
        web
    }

    /// `len` pages in a line: each one links only to the next.
    pub fn chain_web(len: usize) -> FakeWeb {
        let mut web = FakeWeb::new();
        for i in 0..len {
            let next = format!("https://chain.test/{}", i + 1);
            let links: Vec<&str> = if i + 1 < len { vec![next.as_str()] } else { Vec::new() };
            web = web.page(&format!("https://chain.test/{i}"), &[("link", 1)], &links);
        }
        web
    }

    #[test]
    fn test_fake_clock_ticks() {
        let clock = FakeClock::ticking(Duration::from_millis(5));
        let first = clock.now();
        let second = clock.now();
        assert_eq!(second - first, Duration::from_millis(5));

        let frozen = FakeClock::frozen();
        assert_eq!(frozen.now(), frozen.now());
    }
}
