//! Fixed-cadence tickers driven from a frame loop.

use std::time::{Duration, Instant};

/// Fires at a fixed interval, independent of how often it is polled.
///
/// `poll` reports how many whole intervals elapsed since the last firing, so
/// a late poll catches up in one call instead of silently dropping ticks.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next: Instant,
    fired: u64,
}

impl Ticker {
    pub fn new(interval: Duration, start: Instant) -> Self {
        assert!(!interval.is_zero(), "ticker interval must be non-zero");
        Self {
            interval,
            next: start + interval,
            fired: 0,
        }
    }

    pub fn poll(&mut self, now: Instant) -> u32 {
        if now < self.next {
            return 0;
        }

        let behind = now.duration_since(self.next).as_nanos() / self.interval.as_nanos();
        let count = (behind + 1).min(u32::MAX as u128) as u32;
        self.next += self.interval * count;
        self.fired += count as u64;
        count
    }

    /// Total number of ticks fired so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
