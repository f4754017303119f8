//! Frame pacing: skipping and rate limiting.
//!
//! Neither type queues work. A skipped or limited tick is simply dropped so the
//! next processed tick always sees the most recent frame.

use std::time::{Duration, Instant};

/// Processes every Nth tick
#[derive(Debug, Clone)]
pub struct FrameSkipper {
    every: u32,
    counter: u32,
}

impl FrameSkipper {
    /// `every` of 0 is treated as 1
    #[must_use]
    pub fn new(every: u32) -> Self {
        Self {
            every: every.max(1),
            counter: 0,
        }
    }

    /// True when this tick should be processed
    pub fn should_process(&mut self) -> bool {
        let process = self.counter == 0;
        self.counter = (self.counter + 1) % self.every;
        process
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }
}

/// Caps the tick rate at a target FPS; targets of 60 or more are unlimited
#[derive(Debug, Clone)]
pub struct FrameRateLimiter {
    interval: Option<Duration>,
    last: Option<Instant>,
}

impl FrameRateLimiter {
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let interval = if target_fps >= 60 || target_fps == 0 {
            None
        } else {
            Some(Duration::from_secs_f64(1.0 / f64::from(target_fps)))
        };
        Self { interval, last: None }
    }

    /// True when enough time has passed since the last accepted tick
    pub fn should_render(&mut self, now: Instant) -> bool {
        let Some(interval) = self.interval else {
            return true;
        };
        match self.last {
            Some(last) if now.saturating_duration_since(last) < interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    #[must_use]
    pub const fn is_limited(&self) -> bool {
        self.interval.is_some()
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
