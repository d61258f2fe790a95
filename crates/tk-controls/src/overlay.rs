//! Valve-control overlay with auto-dismiss.
//!
//! The overlay is a plain two-state machine. It carries no timer object: the
//! tick driver calls [`ValveOverlay::poll`] once per refresh and the overlay
//! closes itself when more than `timeout_s` has elapsed since it was opened.
//! The bound is therefore soft and tied to the tick cadence.

use crate::error::{ControlError, ControlResult};

/// Default auto-dismiss timeout in seconds.
pub const DEFAULT_OVERLAY_TIMEOUT_S: f64 = 5.0;

/// Visibility of the valve-control overlay.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OverlayState {
    #[default]
    Closed,
    /// Open since the given session time (seconds).
    Open { opened_at_s: f64 },
}

/// Overlay state plus its timeout.
#[derive(Debug, Clone, PartialEq)]
pub struct ValveOverlay {
    state: OverlayState,
    timeout_s: f64,
}

impl Default for ValveOverlay {
    fn default() -> Self {
        Self {
            state: OverlayState::Closed,
            timeout_s: DEFAULT_OVERLAY_TIMEOUT_S,
        }
    }
}

impl ValveOverlay {
    /// Create a closed overlay with the given auto-dismiss timeout.
    ///
    /// # Errors
    ///
    /// Returns error if `timeout_s` is not finite and positive.
    pub fn new(timeout_s: f64) -> ControlResult<Self> {
        if !(timeout_s.is_finite() && timeout_s > 0.0) {
            return Err(ControlError::InvalidArg {
                what: "overlay timeout must be positive",
            });
        }
        Ok(Self {
            state: OverlayState::Closed,
            timeout_s,
        })
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn timeout_s(&self) -> f64 {
        self.timeout_s
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, OverlayState::Open { .. })
    }

    /// Open the overlay at `now_s`. Re-opening restarts the timer.
    pub fn open(&mut self, now_s: f64) {
        self.state = OverlayState::Open { opened_at_s: now_s };
        tracing::debug!(opened_at_s = now_s, "valve overlay opened");
    }

    /// Close the overlay explicitly.
    pub fn close(&mut self) {
        if self.is_open() {
            tracing::debug!("valve overlay closed");
        }
        self.state = OverlayState::Closed;
    }

    /// Auto-dismiss check. Returns `true` if this call closed the overlay.
    pub fn poll(&mut self, now_s: f64) -> bool {
        match self.state {
            OverlayState::Open { opened_at_s } if now_s - opened_at_s > self.timeout_s => {
                self.state = OverlayState::Closed;
                tracing::debug!(opened_at_s, now_s, "valve overlay auto-dismissed");
                true
            }
            _ => false,
        }
    }

    /// Seconds until auto-dismiss, or `None` while closed.
    pub fn remaining_s(&self, now_s: f64) -> Option<f64> {
        match self.state {
            OverlayState::Closed => None,
            OverlayState::Open { opened_at_s } => {
                Some((self.timeout_s - (now_s - opened_at_s)).max(0.0))
            }
        }
    }
}
