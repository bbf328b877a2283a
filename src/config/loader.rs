// src/config/loader.rs
// =============================================================================
// This module reads the crawl configuration from a JSON file.
//
// Configuration problems are reported right away, before a single page is
// fetched. A typo in a field name is an error too (deny_unknown_fields), so
// a misspelled "maxDepht" does not silently fall back to a default.
// =============================================================================

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::CrawlerConfig;

/// Everything that can be wrong with a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Loads a [`CrawlerConfig`] from a file on disk.
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<CrawlerConfig, ConfigError> {
        let file = File::open(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;

        read_config(BufReader::new(file))
    }
}

/// Parses a configuration from any reader (a file, a string, stdin, ...).
pub fn read_config<R: Read>(reader: R) -> Result<CrawlerConfig, ConfigError> {
    Ok(serde_json::from_reader(reader)?)
}
