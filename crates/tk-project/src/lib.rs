//! tk-project: session configuration file format and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_config};

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported config format: {path}")]
    UnsupportedFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &Path) -> ProjectResult<SessionConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml(&content)
}

pub fn parse_yaml(content: &str) -> ProjectResult<SessionConfig> {
    let config: SessionConfig = if content.trim().is_empty() {
        SessionConfig::default()
    } else {
        serde_yaml::from_str(content)?
    };
    validate_config(&config)?;
    Ok(config)
}

pub fn save_yaml(path: &Path, config: &SessionConfig) -> ProjectResult<()> {
    validate_config(config)?;
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<SessionConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: SessionConfig = serde_json::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn save_json(path: &Path, config: &SessionConfig) -> ProjectResult<()> {
    validate_config(config)?;
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.yaml`/`.yml` or `.json`.
pub fn load(path: &Path) -> ProjectResult<SessionConfig> {
    match extension(path).as_deref() {
        Some("yaml") | Some("yml") => load_yaml(path),
        Some("json") => load_json(path),
        _ => Err(ProjectError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

/// Save by extension: `.yaml`/`.yml` or `.json`.
pub fn save(path: &Path, config: &SessionConfig) -> ProjectResult<()> {
    match extension(path).as_deref() {
        Some("yaml") | Some("yml") => save_yaml(path, config),
        Some("json") => save_json(path, config),
        _ => Err(ProjectError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
