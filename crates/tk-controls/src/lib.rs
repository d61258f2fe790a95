//! Operator panel state machines for tankflow.
//!
//! The panel drives the simulation through a small set of controls:
//! - a run state (running / paused)
//! - a valve-control overlay that dismisses itself after a timeout
//! - bounded slider setpoints for flows and tank geometry
//!
//! Everything here is clock-agnostic: callers pass the current session time
//! in seconds, so the same logic serves the desktop panel, the headless
//! runner and the tests.

pub mod error;
pub mod overlay;
pub mod run_state;
pub mod setpoint;

pub use error::{ControlError, ControlResult};
pub use overlay::{DEFAULT_OVERLAY_TIMEOUT_S, OverlayState, ValveOverlay};
pub use run_state::RunState;
pub use setpoint::{BoundedSetpoint, SliderRange};
