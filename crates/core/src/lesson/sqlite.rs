//! SQLite-backed lesson store.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};
use tracing::debug;

use super::{migrations, Lesson, LessonStore, LessonStoreError, NewLesson};

/// SQLite-backed lesson store.
pub struct SqliteLessonStore {
    conn: Mutex<Connection>,
}

impl SqliteLessonStore {
    /// Open (or create) the database file and apply the schema migration.
    pub fn new(path: &Path) -> Result<Self, LessonStoreError> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self, LessonStoreError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, LessonStoreError> {
        if migrations::up(&conn)? {
            debug!(version = migrations::CREATE_LESSONS_VERSION, "Applied migration");
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn row_to_lesson(row: &rusqlite::Row) -> rusqlite::Result<Lesson> {
        Ok(Lesson {
            id: row.get(0)?,
            lesson_number: row.get(1)?,
            lesson_name: row.get(2)?,
            category: row.get(3)?,
            summary: row.get(4)?,
            url: row.get(5)?,
        })
    }
}

impl LessonStore for SqliteLessonStore {
    fn list_all(&self) -> Result<Vec<Lesson>, LessonStoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, lesson_number, lesson_name, category, summary, url
             FROM lessons ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], Self::row_to_lesson)?;

        let mut lessons = Vec::new();
        for row in rows {
            lessons.push(row?);
        }
        Ok(lessons)
    }

    fn get(&self, id: i64) -> Result<Lesson, LessonStoreError> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT id, lesson_number, lesson_name, category, summary, url
             FROM lessons WHERE id = ?",
            params![id],
            Self::row_to_lesson,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => LessonStoreError::NotFound(id),
            _ => LessonStoreError::Database(e.to_string()),
        })
    }

    fn insert(&self, lesson: &NewLesson) -> Result<i64, LessonStoreError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO lessons (lesson_number, lesson_name, category, summary, url)
             VALUES (?, ?, ?, ?, ?)",
            params![
                &lesson.lesson_number,
                &lesson.lesson_name,
                &lesson.category,
                &lesson.summary,
                &lesson.url,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn count(&self) -> Result<u64, LessonStoreError> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM lessons", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
