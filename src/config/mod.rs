// src/config/mod.rs
// =============================================================================
// This module describes how a crawl is configured.
//
// A crawl is driven by a small JSON file, for example:
//
//   {
//     "startPages": ["https://example.com"],
//     "ignoredUrls": ["https://example\\.com/private/.*"],
//     "ignoredWords": ["^.{1,3}$"],
//     "parallelism": 4,
//     "maxDepth": 3,
//     "timeoutSeconds": 10,
//     "popularWordCount": 5
//   }
//
// Submodules:
// - loader: Reads and validates that file
//
// Rust concepts:
// - serde: Turns JSON into Rust structs with #[derive(Deserialize)]
// - Option<T>: For settings that may be left out
// =============================================================================

mod loader;

use std::path::PathBuf;
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;

use crate::crawl::CrawlPolicy;

pub use loader::{ConfigError, ConfigLoader};

/// Which crawl engine to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// One page at a time, on the calling thread
    Sequential,
    /// Many pages at once, on a pool of worker threads
    Parallel,
}

/// The crawl configuration exactly as it appears in the JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CrawlerConfig {
    pub start_pages: Vec<String>,
    pub max_depth: usize,
    pub timeout_seconds: u64,
    pub popular_word_count: usize,

    #[serde(default)]
    pub ignored_urls: Vec<String>,
    #[serde(default)]
    pub ignored_words: Vec<String>,

    // Absent or <= 0 means "as many as the machine has"
    #[serde(default)]
    pub parallelism: Option<i64>,
    #[serde(default)]
    pub implementation_override: Option<Strategy>,

    #[serde(default)]
    pub result_path: Option<PathBuf>,
    #[serde(default)]
    pub profile_output_path: Option<PathBuf>,
}

impl CrawlerConfig {
    /// The parallelism the user asked for, resolved to a positive number.
    pub fn target_parallelism(&self) -> usize {
        match self.parallelism {
            Some(n) if n > 0 => usize::try_from(n).unwrap_or(usize::MAX),
            _ => num_cpus::get(),
        }
    }

    /// The strategy to run when the command line does not pick one.
    pub fn strategy(&self) -> Strategy {
        match self.implementation_override {
            Some(strategy) => strategy,
            None if self.target_parallelism() == 1 => Strategy::Sequential,
            None => Strategy::Parallel,
        }
    }

    /// Compiles the ignored URL patterns into the policy the engine runs with.
    pub fn policy(&self) -> Result<CrawlPolicy, ConfigError> {
        Ok(CrawlPolicy {
            max_depth: self.max_depth,
            timeout: Duration::from_secs(self.timeout_seconds),
            popular_word_count: self.popular_word_count,
            ignored_urls: compile_patterns(&self.ignored_urls)?,
            target_parallelism: self.target_parallelism(),
        })
    }

    /// Compiles the ignored word patterns for the page parser.
    pub fn ignored_words(&self) -> Result<Vec<Regex>, ConfigError> {
        compile_patterns(&self.ignored_words)
    }
}

/// Compiles `pattern` so that it only matches a whole string, never a part of one.
pub fn compile_full_match(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{pattern})$"))
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            compile_full_match(pattern).map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does #[serde(rename_all = "camelCase")] do?
//    - Rust fields use snake_case (max_depth), the JSON file uses camelCase
//      (maxDepth). serde translates between the two for us
//
// 2. What is #[serde(default)]?
//    - If the key is missing from the JSON, use the type's default value
//    - Vec -> empty, Option -> None
//
// 3. Why wrap patterns in ^(?: ... )$?
//    - Regex::is_match() succeeds if the pattern matches ANY part of the text
//    - Anchoring both ends makes it match the whole URL or word only
//    - The (?: ) group keeps "a|b" from turning into "^a|b$"
// -----------------------------------------------------------------------------
