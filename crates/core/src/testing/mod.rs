//! Testing utilities and mock implementations.
//!
//! Mocks for the service seams (enhancer, renderer, store) so the HTTP stack
//! can be exercised without external services.
//!
//! # Example
//!
//! ```rust,ignore
//! use lessons_core::testing::{fixtures, MockQueryEnhancer};
//!
//! let store = fixtures::seeded_store(&[fixtures::lesson(1, "Intro to Git", "VCS", "basics")]);
//! let enhancer = MockQueryEnhancer::new();
//! enhancer.set_response(vec![serde_json::json!({"id": 1})]).await;
//! ```

mod mock_enhancer;
mod mock_renderer;
mod mock_store;

pub use mock_enhancer::{MockQueryEnhancer, RecordedEnhancement};
pub use mock_renderer::MockPdfRenderer;
pub use mock_store::FailingLessonStore;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::sync::Arc;

    use super::FailingLessonStore;
    use crate::lesson::{Lesson, LessonStore, NewLesson, SqliteLessonStore};

    /// Create a lesson with the common fields set.
    pub fn lesson(id: i64, name: &str, category: &str, summary: &str) -> Lesson {
        Lesson {
            id,
            lesson_number: Some(format!("L{}", id)),
            lesson_name: Some(name.to_string()),
            category: Some(category.to_string()),
            summary: Some(summary.to_string()),
            url: Some(format!("https://lessons.example.com/{}", id)),
        }
    }

    /// Strip the id off a lesson.
    pub fn new_lesson(lesson: &Lesson) -> NewLesson {
        NewLesson {
            lesson_number: lesson.lesson_number.clone(),
            lesson_name: lesson.lesson_name.clone(),
            category: lesson.category.clone(),
            summary: lesson.summary.clone(),
            url: lesson.url.clone(),
        }
    }

    /// In-memory store holding `lessons` in order.
    ///
    /// Ids are reassigned by the store starting at 1, so fixtures should
    /// number their lessons 1..=n to keep ids stable.
    pub fn seeded_store(lessons: &[Lesson]) -> Arc<dyn LessonStore> {
        let store = SqliteLessonStore::in_memory().expect("in-memory store");
        for lesson in lessons {
            store.insert(&new_lesson(lesson)).expect("insert fixture");
        }
        Arc::new(store)
    }

    /// Store whose every call fails with a database error.
    pub fn broken_store() -> Arc<dyn LessonStore> {
        Arc::new(FailingLessonStore::new("database is locked"))
    }
}
