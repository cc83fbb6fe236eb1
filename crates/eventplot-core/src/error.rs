// File: crates/eventplot-core/src/error.rs
// Summary: Error taxonomy: file-level load failures (fatal) and per-event failures (isolated).

use std::path::PathBuf;

use thiserror::Error;

/// Missing or ambiguous columns in the header row. Fatal for the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("sheet has no header row")]
    MissingHeader,
    #[error("required column(s) missing: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("both '{0}' and '{1}' columns are present; select a schema mode explicitly")]
    AmbiguousEndDate(&'static str, &'static str),
}

/// Anything that stops the input workbook from turning into rows.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported input '{}': expected an .xlsx workbook", .path.display())]
    UnsupportedInput { path: PathBuf },
    #[error("failed to read '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to open workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),
    #[error("sheet '{name}' not found (available: {})", .available.join(", "))]
    SheetNotFound { name: String, available: Vec<String> },
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Failure confined to one event; the run continues with the remaining events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("event '{event}': cannot compute completion target ({reason})")]
    InvalidTarget { event: String, reason: String },
    #[error("event '{event}': cannot render chart ({reason})")]
    Render { event: String, reason: String },
    #[error("event '{event}': file name '{file_name}' already used by event '{first}'")]
    DuplicateName {
        event: String,
        file_name: String,
        first: String,
    },
}

impl EventError {
    pub fn event(&self) -> &str {
        match self {
            EventError::InvalidTarget { event, .. }
            | EventError::Render { event, .. }
            | EventError::DuplicateName { event, .. } => event,
        }
    }

    /// Short machine-friendly tag used in the run report.
    pub fn kind(&self) -> &'static str {
        match self {
            EventError::InvalidTarget { .. } => "invalid-target",
            EventError::Render { .. } => "render",
            EventError::DuplicateName { .. } => "duplicate-name",
        }
    }
}

/// Run-level error returned by the pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("failed to write archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
