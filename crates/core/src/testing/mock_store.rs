//! Failing lesson store for error-path tests.

use crate::lesson::{Lesson, LessonStore, LessonStoreError, NewLesson};

/// Store whose every operation fails with a database error.
#[derive(Debug, Clone)]
pub struct FailingLessonStore {
    message: String,
}

impl FailingLessonStore {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn error(&self) -> LessonStoreError {
        LessonStoreError::Database(self.message.clone())
    }
}

impl LessonStore for FailingLessonStore {
    fn list_all(&self) -> Result<Vec<Lesson>, LessonStoreError> {
        Err(self.error())
    }

    fn get(&self, _id: i64) -> Result<Lesson, LessonStoreError> {
        Err(self.error())
    }

    fn insert(&self, _lesson: &NewLesson) -> Result<i64, LessonStoreError> {
        Err(self.error())
    }

    fn count(&self) -> Result<u64, LessonStoreError> {
        Err(self.error())
    }
}
