//! Lesson catalog storage.
//!
//! A flat, single-table catalog. Rows are inserted by the CSV importer and
//! never updated or deleted by request handling.

pub mod migrations;
mod sqlite;
mod types;

pub use sqlite::SqliteLessonStore;
pub use types::*;

/// Trait for lesson storage.
pub trait LessonStore: Send + Sync {
    /// All lessons in insertion order.
    fn list_all(&self) -> Result<Vec<Lesson>, LessonStoreError>;

    /// Get a lesson by id.
    fn get(&self, id: i64) -> Result<Lesson, LessonStoreError>;

    /// Insert a lesson, returning the assigned id.
    fn insert(&self, lesson: &NewLesson) -> Result<i64, LessonStoreError>;

    /// Number of stored lessons.
    fn count(&self) -> Result<u64, LessonStoreError>;
}
