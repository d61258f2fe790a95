//! Single-tank level simulation for tankflow.
//!
//! Provides:
//! - Tank mass balance with explicit Euler integration, clamped to geometry
//! - Inlet valve model (open/closed gate plus coefficient-scaled position)
//! - Sliding-window history of level and flow samples
//! - Session state and the per-refresh tick driver
//! - Clock seam for wall-clock and manually stepped time

pub mod clock;
pub mod error;
pub mod history;
pub mod integrator;
pub mod model;
pub mod session;
pub mod tank;
pub mod valve;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::{SimError, SimResult};
pub use history::{DEFAULT_HISTORY_CAPACITY, History, HistorySample};
pub use integrator::{ForwardEuler, Integrator};
pub use model::TransientModel;
pub use session::{DriverSettings, Session, SessionSettings, TickReport};
pub use tank::{MassBalance, OVERFLOW_EPSILON_M3, Tank};
pub use valve::{DEFAULT_FLOW_COEFFICIENT, Valve};
