//! Sources of simulated time.
//!
//! The engine only ever sees elapsed milliseconds. Headless runs advance by a
//! fixed step; paced runs measure how much wall time really passed.

use std::time::{Duration, Instant};

/// Yields the simulated time that passed since the previous call.
pub trait Clock: Send {
    fn tick(&mut self) -> u64;
}

/// Advances by the same amount on every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedStep {
    step_ms: u64,
}

impl FixedStep {
    pub fn new(step_ms: u64) -> Self {
        Self {
            step_ms: step_ms.max(1),
        }
    }
}

impl Clock for FixedStep {
    fn tick(&mut self) -> u64 {
        self.step_ms
    }
}

/// Measures wall time between ticks. Sub-millisecond remainders carry over
/// to the next tick.
#[derive(Clone, Copy, Debug)]
pub struct WallClock {
    last: Instant,
}

impl WallClock {
    pub fn start() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Clock for WallClock {
    fn tick(&mut self) -> u64 {
        let elapsed = Instant::now().duration_since(self.last);
        let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self.last += Duration::from_millis(millis);
        millis
    }
}
