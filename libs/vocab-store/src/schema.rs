//! SQLite schema and versioned migrations.

use crate::error::Result;
use rusqlite::Connection;

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Version 1: vocabulary entries, the singleton progress row, and the
/// matching-mode practice history. Timestamps are epoch milliseconds.
const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS vocabulary (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    word TEXT NOT NULL,
    meaning TEXT NOT NULL,
    example TEXT NOT NULL DEFAULT '',
    pronunciation TEXT,
    topic TEXT NOT NULL,
    is_learned INTEGER NOT NULL DEFAULT 0,
    last_reviewed INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS learning_progress (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    total_words_learned INTEGER NOT NULL DEFAULT 0,
    total_correct_answers INTEGER NOT NULL DEFAULT 0,
    total_attempts INTEGER NOT NULL DEFAULT 0,
    last_study_date INTEGER NOT NULL,
    streak INTEGER NOT NULL DEFAULT 0
);

-- Matching-mode practice timestamps, keyed by word. Deliberately not
-- coupled to the vocabulary table by a foreign key.
CREATE TABLE IF NOT EXISTS practice_history (
    word TEXT PRIMARY KEY,
    last_practiced INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_vocabulary_topic ON vocabulary(topic);
CREATE INDEX IF NOT EXISTS idx_vocabulary_learned ON vocabulary(is_learned);
"#;

const DROP_ALL: &str = r#"
DROP TABLE IF EXISTS vocabulary;
DROP TABLE IF EXISTS learning_progress;
DROP TABLE IF EXISTS practice_history;
"#;

/// Bring the database up to [`SCHEMA_VERSION`].
///
/// Each future version gets its own migration arm here. A stored version
/// this build does not know how to migrate is handled by a destructive
/// reset; acceptable because the store is a personal local cache, not a
/// sync target.
pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);",
    )?;
    let stored: Option<i32> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get(0)
        })?;

    match stored {
        Some(v) if v == SCHEMA_VERSION => Ok(()),
        Some(v) => {
            tracing::warn!(
                stored = v,
                supported = SCHEMA_VERSION,
                "no migration path for stored schema version, resetting database"
            );
            conn.execute_batch(DROP_ALL)?;
            apply_current(conn)
        }
        None => {
            tracing::debug!(version = SCHEMA_VERSION, "creating schema");
            apply_current(conn)
        }
    }
}

fn apply_current(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_V1)?;
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [SCHEMA_VERSION],
    )?;
    Ok(())
}
