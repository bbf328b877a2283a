// src/profiler/mod.rs
// =============================================================================
// This module measures how long the crawler and the page parser take.
//
// How it works:
// - Profiler::wrap_crawler / wrap_parser put a thin wrapper (a "decorator")
//   around a component
// - The wrapper implements the same trait as the component, so the rest of
//   the program cannot tell the difference
// - Every call is forwarded, and its duration is added to a shared table
//   keyed by "Component#operation"
//
// Example report:
//   Run at Sat, 17 Oct 2026 12:00:00 +0200
//   HtmlPageParser#parse took 0m 3s 214ms
//   ParallelCrawler#crawl took 0m 1s 5ms
//
// Submodules:
// - decorators: The wrappers for WebCrawler and PageParser
// - state: The shared timing table
// =============================================================================

mod decorators;
mod state;

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::crawl::WebCrawler;
use crate::parser::PageParser;

pub use decorators::{ProfiledCrawler, ProfiledParser};
pub use state::ProfilingState;

/// Hands out timing decorators and writes their measurements.
pub struct Profiler {
    state: Arc<ProfilingState>,
    started_at: DateTime<Local>,
}

impl Profiler {
    pub fn new() -> Self {
        Self {
            state: Arc::new(ProfilingState::default()),
            started_at: Local::now(),
        }
    }

    /// Times every `crawl()` call of `crawler`.
    pub fn wrap_crawler(&self, crawler: Box<dyn WebCrawler>) -> ProfiledCrawler {
        ProfiledCrawler::new(crawler, self.state.clone())
    }

    /// Times every `parse()` call of `parser`.
    pub fn wrap_parser<P: PageParser>(&self, parser: P) -> ProfiledParser<P> {
        ProfiledParser::new(parser, self.state.clone())
    }

    #[cfg(test)]
    pub fn state(&self) -> &ProfilingState {
        &self.state
    }

    /// Writes the report to `writer`.
    pub fn write_data<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "Run at {}", self.started_at.to_rfc2822())?;
        self.state.write(&mut writer)?;
        writeln!(writer)?;
        writer.flush()
    }

    /// Appends the report to `path`, creating the file if needed.
    pub fn write_data_to_path(&self, path: &Path) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        self.write_data(BufWriter::new(file))
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}
