// src/profiler/decorators.rs
// =============================================================================
// Timing wrappers for the crawler and the page parser.
//
// Each wrapper forwards the call unchanged and records how long it took, even
// when the call fails. The target name comes from the wrapped component, so a
// wrapped ParallelCrawler still reports as "ParallelCrawler".
// =============================================================================

use std::sync::Arc;
use std::time::Instant;

use super::ProfilingState;
use crate::crawl::{CrawlResult, WebCrawler};
use crate::parser::{PageContent, PageParser, ParseError};

/// A [`WebCrawler`] that times every `crawl()` call.
pub struct ProfiledCrawler {
    inner: Box<dyn WebCrawler>,
    state: Arc<ProfilingState>,
}

impl ProfiledCrawler {
    pub(super) fn new(inner: Box<dyn WebCrawler>, state: Arc<ProfilingState>) -> Self {
        Self { inner, state }
    }
}

impl WebCrawler for ProfiledCrawler {
    fn crawl(&self, seeds: &[String]) -> CrawlResult {
        let start = Instant::now();
        let result = self.inner.crawl(seeds);
        self.state.record(self.inner.name(), "crawl", start.elapsed());
        result
    }

    fn max_parallelism(&self) -> usize {
        self.inner.max_parallelism()
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

/// A [`PageParser`] that times every `parse()` call.
pub struct ProfiledParser<P> {
    inner: P,
    state: Arc<ProfilingState>,
}

impl<P: PageParser> ProfiledParser<P> {
    pub(super) fn new(inner: P, state: Arc<ProfilingState>) -> Self {
        Self { inner, state }
    }
}

impl<P: PageParser> PageParser for ProfiledParser<P> {
    fn parse(&self, url: &str) -> Result<PageContent, ParseError> {
        let start = Instant::now();
        let result = self.inner.parse(url);
        self.state.record(self.inner.name(), "parse", start.elapsed());
        result
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
