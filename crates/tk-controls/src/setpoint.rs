//! Bounded slider setpoints.
//!
//! Every write is clamped into the slider range, whatever the source of the
//! value (panel widget, config file or CLI override).

use crate::error::{ControlError, ControlResult};
use tk_core::ensure_finite;

/// Inclusive slider range with a display step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderRange {
    /// Create a validated range.
    ///
    /// # Errors
    ///
    /// Returns error if either bound is non-finite, `min > max`, or `step`
    /// is not positive.
    pub fn new(what: &'static str, min: f64, max: f64, step: f64) -> ControlResult<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ControlError::InvalidRange { what, min, max });
        }
        if !(step.is_finite() && step > 0.0) {
            return Err(ControlError::InvalidArg {
                what: "slider step must be positive",
            });
        }
        Ok(Self { min, max, step })
    }

    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn as_inclusive(&self) -> std::ops::RangeInclusive<f64> {
        self.min..=self.max
    }
}

/// Setpoint value that always stays inside its range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedSetpoint {
    what: &'static str,
    range: SliderRange,
    value: f64,
}

impl BoundedSetpoint {
    /// Create a setpoint; the initial value is clamped into `range`.
    ///
    /// # Errors
    ///
    /// Rejects a range that [`SliderRange::new`] would reject and a
    /// non-finite initial value.
    pub fn new(what: &'static str, range: SliderRange, initial: f64) -> ControlResult<Self> {
        let range = SliderRange::new(what, range.min, range.max, range.step)?;
        let initial = ensure_finite(initial, what)?;
        let clamped = range.clamp(initial);
        if clamped != initial {
            tracing::warn!(what, initial, clamped, "initial setpoint clamped into range");
        }
        Ok(Self {
            what,
            range,
            value: clamped,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn range(&self) -> SliderRange {
        self.range
    }

    pub fn name(&self) -> &'static str {
        self.what
    }

    /// Write a new value, clamped into range. Returns the stored value.
    ///
    /// # Errors
    ///
    /// Non-finite input is rejected and the previous value is kept.
    pub fn set(&mut self, v: f64) -> ControlResult<f64> {
        let v = ensure_finite(v, self.what)?;
        self.value = self.range.clamp(v);
        Ok(self.value)
    }
}
