// src/crawl/result.rs
// =============================================================================
// The final report of a crawl and how it is written out as JSON.
//
// Output format:
//   {
//     "wordCounts": { "rust": 12, "crawler": 7 },
//     "urlsVisited": 3
//   }
//
// "wordCounts" keeps the ranking order, so it is serialized by hand from a
// Vec instead of from a HashMap (which has no order).
// =============================================================================

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use super::ranking::rank;

/// The outcome of one `crawl()` call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CrawlResult {
    word_counts: Vec<(String, u64)>,
    urls_visited: usize,
}

impl CrawlResult {
    /// Wraps already-ranked word counts.
    pub fn new(word_counts: Vec<(String, u64)>, urls_visited: usize) -> Self {
        Self {
            word_counts,
            urls_visited,
        }
    }

    /// Ranks the accumulated counts and keeps the `limit` most popular words.
    pub fn from_counts(counts: &HashMap<String, u64>, limit: usize, urls_visited: usize) -> Self {
        Self::new(rank(counts, limit), urls_visited)
    }

    /// The most popular words, best first.
    pub fn word_counts(&self) -> &[(String, u64)] {
        &self.word_counts
    }

    /// How many distinct URLs were claimed during the crawl.
    pub fn urls_visited(&self) -> usize {
        self.urls_visited
    }

    /// Writes the result as pretty-printed JSON.
    pub fn write_json<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()
    }

    /// Writes the result to `path`, replacing anything already there.
    pub fn write_to_path(&self, path: &Path) -> std::io::Result<()> {
        let file = File::create(path)?;
        self.write_json(BufWriter::new(file))
    }
}

// Serializes the ranked Vec as a JSON object, keeping its order
struct OrderedCounts<'a>(&'a [(String, u64)]);

impl Serialize for OrderedCounts<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (word, count) in self.0 {
            map.serialize_entry(word, count)?;
        }
        map.end()
    }
}

impl Serialize for CrawlResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CrawlResult", 2)?;
        state.serialize_field("wordCounts", &OrderedCounts(&self.word_counts))?;
        state.serialize_field("urlsVisited", &self.urls_visited)?;
        state.end()
    }
}
