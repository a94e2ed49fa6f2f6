use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{ImportError, ImportReport, RowError};
use crate::config::ImportConfig;
use crate::lesson::{LessonStore, NewLesson};
use crate::metrics::IMPORT_ROWS;

/// Header columns every import file must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "lesson_number",
    "lesson_name",
    "category",
    "summary",
    "url",
];

/// One CSV record. Empty cells become `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct CsvLessonRow {
    pub lesson_number: Option<String>,
    pub lesson_name: Option<String>,
    pub category: Option<String>,
    pub summary: Option<String>,
    pub url: Option<String>,
}

impl From<CsvLessonRow> for NewLesson {
    fn from(row: CsvLessonRow) -> Self {
        NewLesson {
            lesson_number: row.lesson_number,
            lesson_name: row.lesson_name,
            category: row.category,
            summary: row.summary,
            url: row.url,
        }
    }
}

/// Streams lesson rows from CSV into a store.
pub struct CsvImporter {
    store: Arc<dyn LessonStore>,
    config: ImportConfig,
}

impl CsvImporter {
    pub fn new(store: Arc<dyn LessonStore>, config: ImportConfig) -> Self {
        Self { store, config }
    }

    /// Import from a file on disk.
    pub fn import_path(&self, path: &Path) -> Result<ImportReport, ImportError> {
        let file = File::open(path)
            .map_err(|e| ImportError::Io(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), "Importing lessons");
        self.import_reader(file)
    }

    /// Import from any reader producing CSV with a header row.
    pub fn import_reader<R: Read>(&self, reader: R) -> Result<ImportReport, ImportError> {
        if self.config.batch_size == 0 {
            return Err(ImportError::InvalidConfig(
                "batch_size cannot be 0".to_string(),
            ));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers().map_err(read_error)?.clone();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !headers.iter().any(|h| h == **col))
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }

        let mut report = ImportReport::default();
        let mut batch: Vec<(Option<u64>, NewLesson)> =
            Vec::with_capacity(self.config.batch_size);
        let mut records = reader.records();

        loop {
            batch.clear();
            let mut exhausted = false;

            while batch.len() < self.config.batch_size {
                let Some(result) = records.next() else {
                    exhausted = true;
                    break;
                };

                match result {
                    Ok(record) => {
                        let line = record.position().map(|p| p.line());
                        match record.deserialize::<CsvLessonRow>(Some(&headers)) {
                            Ok(row) => batch.push((line, row.into())),
                            Err(e) => skip(&mut report, line, e.to_string()),
                        }
                    }
                    Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                        return Err(read_error(e));
                    }
                    Err(e) => {
                        let line = e.position().map(|p| p.line());
                        skip(&mut report, line, e.to_string());
                    }
                }
            }

            if !batch.is_empty() {
                self.insert_batch(&batch, &mut report);
            }
            if exhausted {
                break;
            }
        }

        info!(
            inserted = report.inserted,
            skipped = report.skipped.len(),
            batches = report.batches,
            "CSV import finished"
        );
        Ok(report)
    }

    fn insert_batch(&self, batch: &[(Option<u64>, NewLesson)], report: &mut ImportReport) {
        report.batches += 1;
        debug!(batch = report.batches, rows = batch.len(), "Inserting batch");

        for (line, lesson) in batch {
            match self.store.insert(lesson) {
                Ok(_) => {
                    report.inserted += 1;
                    IMPORT_ROWS.with_label_values(&["inserted"]).inc();
                }
                Err(e) => skip(report, *line, format!("insert failed: {}", e)),
            }
        }
    }
}

fn skip(report: &mut ImportReport, line: Option<u64>, message: String) {
    warn!(line = ?line, error = %message, "Skipping CSV row");
    IMPORT_ROWS.with_label_values(&["skipped"]).inc();
    report.skipped.push(RowError { line, message });
}

fn read_error(e: csv::Error) -> ImportError {
    ImportError::Io(e.to_string())
}
