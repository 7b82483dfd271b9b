//! Time sources for the frame driver
//!
//! The simulation itself only ever sees a millisecond timestamp passed to
//! `tick`; these are what a host uses to produce it.

use std::time::Instant;

/// A monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since the clock's origin; never decreases
    fn now_ms(&self) -> f64;
}

/// Wall-clock time backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-advanced clock for headless runs and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self { now: start_ms }
    }

    /// Move time forward; negative steps are ignored
    pub fn advance(&mut self, ms: f64) {
        if ms > 0.0 {
            self.now += ms;
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_only_moves_forward() {
        let mut clock = ManualClock::new(10.0);
        clock.advance(5.0);
        clock.advance(-100.0);
        assert_eq!(clock.now_ms(), 15.0);
    }

    #[test]
    fn test_monotonic_clock_never_decreases() {
        let clock = MonotonicClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
        assert!(a >= 0.0);
    }
}
