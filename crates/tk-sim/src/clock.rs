//! Time sources for the tick driver.
//!
//! Session time is seconds (`f64`) since the clock was created.

use std::time::Instant;

pub trait Clock {
    fn now_s(&self) -> f64;
}

/// Wall clock for the interactive panel.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for MonotonicClock {
    fn now_s(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Manually stepped clock for headless runs and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ManualClock {
    t_s: f64,
}

impl ManualClock {
    pub fn new(t_s: f64) -> Self {
        Self { t_s }
    }

    pub fn advance(&mut self, dt_s: f64) -> f64 {
        self.t_s += dt_s;
        self.t_s
    }

    pub fn set(&mut self, t_s: f64) {
        self.t_s = t_s;
    }
}

impl Clock for ManualClock {
    fn now_s(&self) -> f64 {
        self.t_s
    }
}
