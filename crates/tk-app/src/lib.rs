//! Shared application service layer for tankflow.
//!
//! Both the CLI and the desktop panel go through this crate to turn a
//! configuration file into a live session, run sessions headless and export
//! the history window.

pub mod config_service;
pub mod error;
pub mod export;
pub mod run_service;

pub use config_service::{
    ConfigSummary, load_config, save_config, session_settings, start_session, summarize,
};
pub use error::{AppError, AppResult};
pub use export::{ExportFormat, HistoryExport, export_history, write_csv, write_json};
pub use run_service::{HeadlessRequest, HeadlessResponse, RunProgressEvent, run_headless};
