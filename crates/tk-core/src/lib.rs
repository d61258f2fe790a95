//! tk-core: shared foundation for tankflow.
//!
//! Contains:
//! - units (uom SI types + constructors for tank geometry and flow)
//! - numeric (finite/positive checks and clamping helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{TkError, TkResult};
pub use numeric::*;
pub use units::*;
