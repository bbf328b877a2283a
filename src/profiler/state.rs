// src/profiler/state.rs
// =============================================================================
// The shared table of measured durations.
//
// Parser calls are timed from many worker threads at once, so the table is a
// DashMap: each entry is updated under its own shard lock.
// =============================================================================

use std::io::{self, Write};
use std::time::Duration;

use dashmap::DashMap;

/// Total time spent per "Component#operation".
#[derive(Debug, Default)]
pub struct ProfilingState {
    totals: DashMap<String, Duration>,
}

impl ProfilingState {
    /// Adds `elapsed` to the running total for `target#operation`.
    pub fn record(&self, target: &str, operation: &str, elapsed: Duration) {
        *self
            .totals
            .entry(format!("{target}#{operation}"))
            .or_insert(Duration::ZERO) += elapsed;
    }

    /// The accumulated time for `target#operation`, if it was ever recorded.
    #[cfg(test)]
    pub fn total(&self, target: &str, operation: &str) -> Option<Duration> {
        self.totals
            .get(&format!("{target}#{operation}"))
            .map(|entry| *entry.value())
    }

    /// Writes one line per entry, sorted by key.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let mut entries: Vec<(String, Duration)> = self
            .totals
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        entries.sort();

        for (key, elapsed) in entries {
            writeln!(writer, "{} took {}", key, format_duration(elapsed))?;
        }
        Ok(())
    }
}

// 61.25 seconds -> "1m 1s 250ms"
fn format_duration(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    format!(
        "{}m {}s {}ms",
        total_secs / 60,
        total_secs % 60,
        elapsed.subsec_millis()
    )
}
