//! CSV import of lessons.
//!
//! Rows are read in bounded batches; each batch is fully inserted before the
//! next one is read, so at most `batch_size` rows are ever pending. A bad row
//! is recorded and skipped. Failing to read the file aborts the import, while
//! rows from completed batches stay inserted.

mod csv_importer;

pub use csv_importer::{CsvImporter, CsvLessonRow, REQUIRED_COLUMNS};

use serde::Serialize;
use thiserror::Error;

/// Errors that abort an import.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Invalid import configuration: {0}")]
    InvalidConfig(String),
}

/// A row that was skipped.
#[derive(Debug, Clone, Serialize)]
pub struct RowError {
    /// 1-based line number in the source file, when known.
    pub line: Option<u64>,
    pub message: String,
}

/// Outcome of an import.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub inserted: usize,
    pub skipped: Vec<RowError>,
    pub batches: usize,
}
