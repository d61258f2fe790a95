//! Error types for the tk-app service layer.

use std::path::PathBuf;

/// Application error type shared by the CLI and the panel.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Failed to write export file: {path}")]
    ExportWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tk-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<tk_project::ProjectError> for AppError {
    fn from(err: tk_project::ProjectError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<tk_sim::SimError> for AppError {
    fn from(err: tk_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<tk_controls::ControlError> for AppError {
    fn from(err: tk_controls::ControlError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
