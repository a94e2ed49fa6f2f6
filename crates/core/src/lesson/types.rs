//! Types for the lesson catalog.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored lesson.
///
/// Every column except `id` is nullable in storage, so each attribute is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// System-assigned identifier.
    pub id: i64,
    /// External lesson identifier (e.g. "1.2").
    pub lesson_number: Option<String>,
    pub lesson_name: Option<String>,
    pub category: Option<String>,
    pub summary: Option<String>,
    pub url: Option<String>,
}

/// A lesson that has not been assigned an id yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLesson {
    pub lesson_number: Option<String>,
    pub lesson_name: Option<String>,
    pub category: Option<String>,
    pub summary: Option<String>,
    pub url: Option<String>,
}

impl Lesson {
    /// Plain-text block used for copy-to-clipboard.
    ///
    /// Absent attributes are left out.
    pub fn details(&self) -> String {
        let mut lines = Vec::new();
        if let Some(name) = &self.lesson_name {
            lines.push(name.clone());
        }
        let labelled = [
            ("Lesson", &self.lesson_number),
            ("Category", &self.category),
            ("Summary", &self.summary),
            ("URL", &self.url),
        ];
        for (label, value) in labelled {
            if let Some(value) = value {
                lines.push(format!("{}: {}", label, value));
            }
        }
        lines.join("\n")
    }
}

/// Errors for lesson storage operations.
#[derive(Debug, Error)]
pub enum LessonStoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Lesson not found: {0}")]
    NotFound(i64),
}

impl From<rusqlite::Error> for LessonStoreError {
    fn from(e: rusqlite::Error) -> Self {
        LessonStoreError::Database(e.to_string())
    }
}
