//! Schema migration for the lessons table.
//!
//! There is exactly one migration. `up` is idempotent and runs whenever a
//! store is opened; `down` is only reachable through the admin CLI.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

use super::LessonStoreError;

/// Version identifier of the create-table migration.
pub const CREATE_LESSONS_VERSION: &str = "20250217213615_create_lessons_table";

/// Whether the migration has been applied, and when.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationStatus {
    pub version: &'static str,
    pub applied_at: Option<DateTime<Utc>>,
}

impl MigrationStatus {
    pub fn is_applied(&self) -> bool {
        self.applied_at.is_some()
    }
}

fn ensure_ledger(conn: &Connection) -> Result<(), LessonStoreError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the lessons table. Returns true if this call applied the migration.
pub fn up(conn: &Connection) -> Result<bool, LessonStoreError> {
    ensure_ledger(conn)?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS lessons (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            lesson_number TEXT,
            lesson_name TEXT,
            category TEXT,
            summary TEXT,
            url TEXT
        );
        "#,
    )?;

    let inserted = conn.execute(
        "INSERT OR IGNORE INTO schema_migrations (version, applied_at) VALUES (?, ?)",
        params![CREATE_LESSONS_VERSION, Utc::now().to_rfc3339()],
    )?;

    Ok(inserted > 0)
}

/// Drop the lessons table. Returns true if the migration had been applied.
pub fn down(conn: &Connection) -> Result<bool, LessonStoreError> {
    ensure_ledger(conn)?;

    conn.execute_batch("DROP TABLE IF EXISTS lessons;")?;
    let removed = conn.execute(
        "DELETE FROM schema_migrations WHERE version = ?",
        params![CREATE_LESSONS_VERSION],
    )?;

    Ok(removed > 0)
}

/// Report the migration state.
pub fn status(conn: &Connection) -> Result<MigrationStatus, LessonStoreError> {
    ensure_ledger(conn)?;

    let applied_at: Option<String> = conn
        .query_row(
            "SELECT applied_at FROM schema_migrations WHERE version = ?",
            params![CREATE_LESSONS_VERSION],
            |row| row.get(0),
        )
        .optional()?;

    let applied_at = applied_at
        .map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| LessonStoreError::Database(format!("bad applied_at {:?}: {}", s, e)))
        })
        .transpose()?;

    Ok(MigrationStatus {
        version: CREATE_LESSONS_VERSION,
        applied_at,
    })
}

/// Apply the migration to the database file at `path`.
pub fn up_at(path: &Path) -> Result<bool, LessonStoreError> {
    up(&Connection::open(path)?)
}

/// Revert the migration on the database file at `path`.
pub fn down_at(path: &Path) -> Result<bool, LessonStoreError> {
    down(&Connection::open(path)?)
}

/// Migration state of the database file at `path`.
pub fn status_at(path: &Path) -> Result<MigrationStatus, LessonStoreError> {
    status(&Connection::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_exists(conn: &Connection) -> bool {
        conn.query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'lessons'",
            [],
            |_| Ok(true),
        )
        .unwrap_or(false)
    }

    #[test]
    fn test_up_creates_table_once() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(!status(&conn).unwrap().is_applied());

        assert!(up(&conn).unwrap());
        assert!(table_exists(&conn));
        assert!(status(&conn).unwrap().is_applied());

        // Second run is a no-op
        assert!(!up(&conn).unwrap());
    }

    #[test]
    fn test_down_drops_table() {
        let conn = Connection::open_in_memory().unwrap();
        up(&conn).unwrap();

        assert!(down(&conn).unwrap());
        assert!(!table_exists(&conn));
        assert!(!status(&conn).unwrap().is_applied());

        assert!(!down(&conn).unwrap());
    }

    #[test]
    fn test_up_keeps_existing_rows() {
        let conn = Connection::open_in_memory().unwrap();
        up(&conn).unwrap();
        conn.execute("INSERT INTO lessons (lesson_name) VALUES ('kept')", [])
            .unwrap();

        up(&conn).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM lessons", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_path_helpers_share_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lessons.db");

        assert!(up_at(&path).unwrap());
        assert!(status_at(&path).unwrap().is_applied());
        assert!(down_at(&path).unwrap());
        assert!(!status_at(&path).unwrap().is_applied());
    }
}
