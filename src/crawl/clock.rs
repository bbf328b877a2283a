// src/crawl/clock.rs
// =============================================================================
// Where the crawler gets "now" from.
//
// The engine reads the time through the Clock trait instead of calling
// Instant::now() directly, so tests can control the deadline precisely.
// =============================================================================

use std::time::{Duration, Instant};

/// A source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// The real, monotonic system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// The instant after which a crawl stops starting new pages.
///
/// A timeout too large to add to the current instant means there is no
/// deadline at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    pub fn after(clock: &dyn Clock, timeout: Duration) -> Self {
        Self(clock.now().checked_add(timeout))
    }

    pub fn has_passed(&self, clock: &dyn Clock) -> bool {
        match self.0 {
            Some(at) => clock.now() > at,
            None => false,
        }
    }
}
