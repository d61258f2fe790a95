//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while configuring or driving a session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Control error: {0}")]
    Control(#[from] tk_controls::ControlError),
}

pub type SimResult<T> = Result<T, SimError>;

impl From<tk_core::TkError> for SimError {
    fn from(e: tk_core::TkError) -> Self {
        SimError::Config {
            message: e.to_string(),
        }
    }
}
