//! Inlet valve.
//!
//! Two notions live on the same valve:
//! - `is_open`: the on/off gate that decides whether the inlet setpoint
//!   reaches the tank. This is what the tick driver uses.
//! - `position` and `flow_coefficient`: a linear coefficient-scaled flow,
//!   adjusted from the valve-control overlay and shown as a readout only.

use crate::error::SimResult;
use tk_core::{clamp_unit, ensure_positive};

pub const DEFAULT_FLOW_COEFFICIENT: f64 = 0.8;

#[derive(Clone, Debug, PartialEq)]
pub struct Valve {
    flow_coefficient: f64,
    /// Normalized position, 0 (closed) to 1 (fully open)
    position: f64,
    is_open: bool,
}

impl Default for Valve {
    fn default() -> Self {
        Self {
            flow_coefficient: DEFAULT_FLOW_COEFFICIENT,
            position: 0.0,
            is_open: false,
        }
    }
}

impl Valve {
    /// Create a closed valve at position 0.
    ///
    /// # Errors
    ///
    /// Returns error if `flow_coefficient` is not finite and positive.
    pub fn new(flow_coefficient: f64) -> SimResult<Self> {
        Ok(Self {
            flow_coefficient: ensure_positive(flow_coefficient, "flow_coefficient")?,
            ..Self::default()
        })
    }

    pub fn with_position(mut self, position: f64) -> Self {
        self.set_position(position);
        self
    }

    pub fn flow_coefficient(&self) -> f64 {
        self.flow_coefficient
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Set position, clamped to [0, 1].
    pub fn set_position(&mut self, position: f64) {
        self.position = clamp_unit(position);
    }

    pub fn fully_open(&mut self) {
        self.position = 1.0;
    }

    pub fn fully_close(&mut self) {
        self.position = 0.0;
    }

    /// Coefficient-scaled flow: `Cv * position`.
    pub fn flow_rate(&self) -> f64 {
        self.flow_coefficient * self.position
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn set_open(&mut self, open: bool) {
        self.is_open = open;
    }

    pub fn toggle(&mut self) -> bool {
        self.is_open = !self.is_open;
        self.is_open
    }

    /// Inlet flow actually delivered: the setpoint when open, else zero.
    pub fn gated_flow(&self, setpoint_m3ps: f64) -> f64 {
        if self.is_open { setpoint_m3ps } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let valve = Valve::default();
        assert_eq!(valve.flow_coefficient(), 0.8);
        assert_eq!(valve.position(), 0.0);
        assert!(!valve.is_open());
        assert_eq!(valve.flow_rate(), 0.0);
    }

    #[test]
    fn flow_rate_is_linear_in_position() {
        let mut valve = Valve::new(0.8).unwrap();
        valve.set_position(0.5);
        assert!((valve.flow_rate() - 0.4).abs() < 1e-12);
        valve.fully_open();
        assert!((valve.flow_rate() - 0.8).abs() < 1e-12);
        valve.fully_close();
        assert_eq!(valve.flow_rate(), 0.0);
    }

    #[test]
    fn position_is_clamped() {
        let mut valve = Valve::default();
        valve.set_position(1.7);
        assert_eq!(valve.position(), 1.0);
        valve.set_position(-0.2);
        assert_eq!(valve.position(), 0.0);
        valve.set_position(f64::NAN);
        assert_eq!(valve.position(), 0.0);
    }

    #[test]
    fn gate_is_independent_of_position() {
        let mut valve = Valve::default().with_position(1.0);
        assert_eq!(valve.gated_flow(0.8), 0.0);
        assert!(valve.toggle());
        valve.fully_close();
        assert_eq!(valve.gated_flow(0.8), 0.8);
    }

    #[test]
    fn invalid_coefficient() {
        assert!(Valve::new(0.0).is_err());
        assert!(Valve::new(-0.8).is_err());
    }
}
