//! Export of the in-memory history window.
//!
//! Nothing is ever read back: the export is a snapshot for spreadsheets
//! and notebooks.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tk_sim::{History, HistorySample};

use crate::error::{AppError, AppResult};

pub const CSV_HEADER: &str = "time_s,level_pct,inlet_flow,outlet_flow";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => Ok(ExportFormat::Csv),
            Some("json") => Ok(ExportFormat::Json),
            _ => Err(AppError::InvalidInput(format!(
                "cannot infer export format from {}",
                path.display()
            ))),
        }
    }
}

/// JSON envelope for an exported window.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryExport {
    /// Wall-clock time of session time zero (RFC 3339)
    pub started_at: String,
    pub exported_at: String,
    pub capacity: usize,
    pub samples: Vec<HistorySample>,
}

impl HistoryExport {
    pub fn new(started_at: chrono::DateTime<chrono::Utc>, history: &History) -> Self {
        Self {
            started_at: started_at.to_rfc3339(),
            exported_at: chrono::Utc::now().to_rfc3339(),
            capacity: history.capacity(),
            samples: history.to_series(),
        }
    }
}

pub fn write_csv<W: Write>(mut out: W, samples: &[HistorySample]) -> std::io::Result<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for s in samples {
        writeln!(
            out,
            "{},{},{},{}",
            s.time_s, s.level_pct, s.inlet_flow, s.outlet_flow
        )?;
    }
    Ok(())
}

pub fn write_json<W: Write>(out: W, export: &HistoryExport) -> AppResult<()> {
    serde_json::to_writer_pretty(out, export)?;
    Ok(())
}

/// Write the history window to `path` in the given format.
pub fn export_history(
    path: &Path,
    format: ExportFormat,
    started_at: chrono::DateTime<chrono::Utc>,
    history: &History,
) -> AppResult<()> {
    let file = std::fs::File::create(path).map_err(|e| AppError::ExportWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    let write_err = |e: std::io::Error| AppError::ExportWrite {
        path: path.to_path_buf(),
        source: e,
    };
    let mut out = std::io::BufWriter::new(file);
    match format {
        ExportFormat::Csv => write_csv(&mut out, &history.to_series()).map_err(write_err)?,
        ExportFormat::Json => write_json(&mut out, &HistoryExport::new(started_at, history))?,
    }
    out.flush().map_err(write_err)?;
    tracing::info!(path = %path.display(), samples = history.len(), "history exported");
    Ok(())
}
