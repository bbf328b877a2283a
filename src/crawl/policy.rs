// src/crawl/policy.rs
// =============================================================================
// The rules every crawl task checks before it does any work.
// =============================================================================

use std::time::Duration;

use regex::Regex;

/// Limits and exclusions for one crawler.
///
/// Built from the configuration file (see `CrawlerConfig::policy`) and
/// read-only while a crawl runs.
#[derive(Debug, Clone)]
pub struct CrawlPolicy {
    /// How many link hops to follow. A seed is at depth `max_depth`, its links
    /// at `max_depth - 1`, and nothing is visited at depth 0.
    pub max_depth: usize,
    /// Wall-clock budget for one `crawl()` call.
    pub timeout: Duration,
    /// How many words the final report keeps.
    pub popular_word_count: usize,
    /// Full-match patterns for URLs that are never visited.
    pub ignored_urls: Vec<Regex>,
    /// Worker threads the parallel crawler would like to use.
    pub target_parallelism: usize,
}

impl CrawlPolicy {
    /// Returns true if `url` matches one of the ignored URL patterns.
    pub fn is_ignored(&self, url: &str) -> bool {
        self.ignored_urls.iter().any(|pattern| pattern.is_match(url))
    }
}
