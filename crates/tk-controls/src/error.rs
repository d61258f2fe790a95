//! Error types for control operations.

use thiserror::Error;

/// Result type for control operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur when configuring or driving panel controls.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Non-finite operator input.
    #[error("Rejected non-finite input for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    /// Slider range is inverted or non-finite.
    #[error("Invalid range for {what}: [{min}, {max}]")]
    InvalidRange {
        what: &'static str,
        min: f64,
        max: f64,
    },
}

impl From<tk_core::TkError> for ControlError {
    fn from(e: tk_core::TkError) -> Self {
        match e {
            tk_core::TkError::NonFinite { what, value } => ControlError::NonFinite { what, value },
            tk_core::TkError::NonPositive { what, .. } => ControlError::InvalidArg { what },
        }
    }
}
