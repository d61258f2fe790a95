//! Sliding-window history of tank samples.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::error::{SimError, SimResult};

pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// One recorded tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistorySample {
    /// Session time (seconds)
    pub time_s: f64,
    /// Fill level, 0-100
    pub level_pct: f64,
    /// Applied inlet flow (m³/s)
    pub inlet_flow: f64,
    /// Applied outlet flow (m³/s)
    pub outlet_flow: f64,
}

/// Fixed-capacity FIFO of samples in insertion (chronological) order.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    samples: VecDeque<HistorySample>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(DEFAULT_HISTORY_CAPACITY),
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl History {
    pub fn new(capacity: usize) -> SimResult<Self> {
        if capacity == 0 {
            return Err(SimError::InvalidArg {
                what: "history capacity must be at least 1",
            });
        }
        Ok(Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Append a sample, evicting the oldest when full.
    pub fn append(&mut self, sample: HistorySample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistorySample> + ExactSizeIterator {
        self.samples.iter()
    }

    /// Ordered copy for rendering and export.
    pub fn to_series(&self) -> Vec<HistorySample> {
        self.samples.iter().copied().collect()
    }

    /// `[time_s, value]` pairs for plotting one field.
    pub fn points(&self, field: impl Fn(&HistorySample) -> f64) -> Vec<[f64; 2]> {
        self.samples.iter().map(|s| [s.time_s, field(s)]).collect()
    }

    pub fn latest(&self) -> Option<&HistorySample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample(t: f64) -> HistorySample {
        HistorySample {
            time_s: t,
            level_pct: 0.0,
            inlet_flow: 0.0,
            outlet_flow: 0.0,
        }
    }

    #[test]
    fn zero_capacity_rejected() {
        assert!(History::new(0).is_err());
    }

    #[test]
    fn evicts_first_sample_on_overflow() {
        let mut history = History::default();
        for i in 0..101 {
            history.append(sample(i as f64));
        }
        assert_eq!(history.len(), 100);
        let series = history.to_series();
        assert_eq!(series.first().unwrap().time_s, 1.0);
        assert_eq!(series.last().unwrap().time_s, 100.0);
    }

    #[test]
    fn reset_clears() {
        let mut history = History::new(3).unwrap();
        history.append(sample(0.0));
        history.reset();
        assert!(history.is_empty());
        assert_eq!(history.capacity(), 3);
        assert!(history.latest().is_none());
    }

    #[test]
    fn points_pick_field() {
        let mut history = History::new(4).unwrap();
        history.append(HistorySample {
            time_s: 0.5,
            level_pct: 12.5,
            inlet_flow: 0.8,
            outlet_flow: 0.35,
        });
        assert_eq!(history.points(|s| s.level_pct), vec![[0.5, 12.5]]);
        assert_eq!(history.points(|s| s.outlet_flow), vec![[0.5, 0.35]]);
    }

    proptest! {
        #[test]
        fn window_keeps_newest_in_order(capacity in 1usize..20, n in 0usize..60) {
            let mut history = History::new(capacity).unwrap();
            for i in 0..n {
                history.append(sample(i as f64));
            }
            prop_assert_eq!(history.len(), n.min(capacity));
            let times: Vec<f64> = history.iter().map(|s| s.time_s).collect();
            let expected: Vec<f64> = (n.saturating_sub(capacity)..n).map(|i| i as f64).collect();
            prop_assert_eq!(times, expected);
        }
    }
}
