//! Repository pattern for database access.

use crate::error::{Result, StoreError};
use crate::schema;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use vocab_core::types::{EntryDraft, ProgressRecord, VocabularyEntry};

/// Repository for vocabulary entries.
pub trait VocabularyRepository {
    fn get_entry(&self, id: i64) -> Result<Option<VocabularyEntry>>;
    /// All entries ordered by word ascending (default BINARY collation).
    fn list_all(&self) -> Result<Vec<VocabularyEntry>>;
    fn list_by_topic(&self, topic: &str) -> Result<Vec<VocabularyEntry>>;
    fn list_unlearned(&self) -> Result<Vec<VocabularyEntry>>;
    fn list_topics(&self) -> Result<Vec<String>>;
    /// Insert a draft; the assigned id is monotonic and never reused.
    fn insert_entry(&self, draft: &EntryDraft, now: DateTime<Utc>) -> Result<i64>;
    /// Replace an existing entry in place; errors when the id is absent.
    fn update_entry(&self, entry: &VocabularyEntry) -> Result<()>;
    /// Remove by id; deleting an absent id is a no-op.
    fn delete_entry(&self, id: i64) -> Result<()>;
}

/// Repository for the singleton progress row. All counter mutations are
/// single-statement updates so concurrent callers cannot lose increments.
pub trait ProgressRepository {
    /// Create the row with zeroed counters if it does not exist. Idempotent:
    /// never resets counters accumulated by a previous session.
    fn init_progress(&self, now: DateTime<Utc>) -> Result<()>;
    fn get_progress(&self) -> Result<Option<ProgressRecord>>;
    fn increment_words_learned(&self) -> Result<()>;
    fn increment_correct_answers(&self) -> Result<()>;
    fn increment_attempts(&self) -> Result<()>;
    /// Recompute the streak in one atomic update: a whole day elapsed since
    /// the last study extends it, a longer gap resets it to 1, the same day
    /// leaves it unchanged. `last_study_date` is always set to `now`.
    fn update_streak(&self, now: DateTime<Utc>) -> Result<()>;
}

/// Repository for matching-mode practice timestamps, keyed by word.
pub trait PracticeHistoryRepository {
    fn last_practiced(&self, word: &str) -> Result<Option<DateTime<Utc>>>;
    fn all_last_practiced(&self) -> Result<HashMap<String, DateTime<Utc>>>;
    fn record_practiced(&self, word: &str, at: DateTime<Utc>) -> Result<()>;
}

/// SQLite implementation of the repositories.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the database at `path`, creating and migrating as necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> Result<()> {
        schema::migrate(&self.conn)
    }

    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<VocabularyEntry> {
        let reviewed_ms: i64 = row.get(7)?;
        let last_reviewed = DateTime::from_timestamp_millis(reviewed_ms)
            .ok_or(rusqlite::Error::IntegralValueOutOfRange(7, reviewed_ms))?;
        Ok(VocabularyEntry {
            id: row.get(0)?,
            word: row.get(1)?,
            meaning: row.get(2)?,
            example: row.get(3)?,
            pronunciation: row.get(4)?,
            topic: row.get(5)?,
            is_learned: row.get(6)?,
            last_reviewed,
        })
    }
}

const ENTRY_COLUMNS: &str =
    "id, word, meaning, example, pronunciation, topic, is_learned, last_reviewed";

impl VocabularyRepository for SqliteStore {
    fn get_entry(&self, id: i64) -> Result<Option<VocabularyEntry>> {
        self.conn
            .query_row(
                &format!("SELECT {ENTRY_COLUMNS} FROM vocabulary WHERE id = ?1"),
                params![id],
                Self::row_to_entry,
            )
            .optional()
            .map_err(Into::into)
    }

    fn list_all(&self) -> Result<Vec<VocabularyEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {ENTRY_COLUMNS} FROM vocabulary ORDER BY word ASC"))?;
        let entries = stmt
            .query_map([], Self::row_to_entry)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    fn list_by_topic(&self, topic: &str) -> Result<Vec<VocabularyEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {ENTRY_COLUMNS} FROM vocabulary WHERE topic = ?1"))?;
        let entries = stmt
            .query_map(params![topic], Self::row_to_entry)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    fn list_unlearned(&self) -> Result<Vec<VocabularyEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {ENTRY_COLUMNS} FROM vocabulary WHERE is_learned = 0"))?;
        let entries = stmt
            .query_map([], Self::row_to_entry)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    fn list_topics(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT topic FROM vocabulary")?;
        let topics = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(topics)
    }

    fn insert_entry(&self, draft: &EntryDraft, now: DateTime<Utc>) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO vocabulary (word, meaning, example, pronunciation, topic, is_learned, last_reviewed)
             VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)",
            params![
                draft.word,
                draft.meaning,
                draft.example,
                draft.pronunciation,
                draft.topic,
                now.timestamp_millis(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_entry(&self, entry: &VocabularyEntry) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE vocabulary
                SET word = ?1, meaning = ?2, example = ?3, pronunciation = ?4,
                    topic = ?5, is_learned = ?6, last_reviewed = ?7
              WHERE id = ?8",
            params![
                entry.word,
                entry.meaning,
                entry.example,
                entry.pronunciation,
                entry.topic,
                entry.is_learned,
                entry.last_reviewed.timestamp_millis(),
                entry.id,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::EntryNotFound(entry.id));
        }
        Ok(())
    }

    fn delete_entry(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM vocabulary WHERE id = ?1", params![id])?;
        Ok(())
    }
}

impl ProgressRepository for SqliteStore {
    fn init_progress(&self, now: DateTime<Utc>) -> Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO learning_progress (id, last_study_date) VALUES (1, ?1)",
            params![now.timestamp_millis()],
        )?;
        Ok(())
    }

    fn get_progress(&self) -> Result<Option<ProgressRecord>> {
        self.conn
            .query_row(
                "SELECT total_words_learned, total_correct_answers, total_attempts,
                        last_study_date, streak
                   FROM learning_progress WHERE id = 1",
                [],
                |row| {
                    let studied_ms: i64 = row.get(3)?;
                    let last_study_date = DateTime::from_timestamp_millis(studied_ms)
                        .ok_or(rusqlite::Error::IntegralValueOutOfRange(3, studied_ms))?;
                    Ok(ProgressRecord {
                        total_words_learned: row.get(0)?,
                        total_correct_answers: row.get(1)?,
                        total_attempts: row.get(2)?,
                        last_study_date,
                        streak: row.get(4)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    fn increment_words_learned(&self) -> Result<()> {
        self.conn.execute(
            "UPDATE learning_progress SET total_words_learned = total_words_learned + 1 WHERE id = 1",
            [],
        )?;
        Ok(())
    }

    fn increment_correct_answers(&self) -> Result<()> {
        self.conn.execute(
            "UPDATE learning_progress SET total_correct_answers = total_correct_answers + 1 WHERE id = 1",
            [],
        )?;
        Ok(())
    }

    fn increment_attempts(&self) -> Result<()> {
        self.conn.execute(
            "UPDATE learning_progress SET total_attempts = total_attempts + 1 WHERE id = 1",
            [],
        )?;
        Ok(())
    }

    fn update_streak(&self, now: DateTime<Utc>) -> Result<()> {
        // Integer division truncates, so a partial day counts as zero.
        self.conn.execute(
            "UPDATE learning_progress
                SET streak = CASE
                      WHEN ((?1 - last_study_date) / 86400000) = 1 THEN streak + 1
                      WHEN ((?1 - last_study_date) / 86400000) > 1 THEN 1
                      ELSE streak
                    END,
                    last_study_date = ?1
              WHERE id = 1",
            params![now.timestamp_millis()],
        )?;
        Ok(())
    }
}

impl PracticeHistoryRepository for SqliteStore {
    fn last_practiced(&self, word: &str) -> Result<Option<DateTime<Utc>>> {
        let ms: Option<i64> = self
            .conn
            .query_row(
                "SELECT last_practiced FROM practice_history WHERE word = ?1",
                params![word],
                |row| row.get(0),
            )
            .optional()?;
        match ms {
            Some(ms) => DateTime::from_timestamp_millis(ms)
                .map(Some)
                .ok_or_else(|| StoreError::InvalidData(format!("bad timestamp {ms} for {word}"))),
            None => Ok(None),
        }
    }

    fn all_last_practiced(&self) -> Result<HashMap<String, DateTime<Utc>>> {
        let mut stmt = self
            .conn
            .prepare("SELECT word, last_practiced FROM practice_history")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut history = HashMap::with_capacity(rows.len());
        for (word, ms) in rows {
            let at = DateTime::from_timestamp_millis(ms)
                .ok_or_else(|| StoreError::InvalidData(format!("bad timestamp {ms} for {word}")))?;
            history.insert(word, at);
        }
        Ok(history)
    }

    fn record_practiced(&self, word: &str, at: DateTime<Utc>) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO practice_history (word, last_practiced) VALUES (?1, ?2)",
            params![word, at.timestamp_millis()],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn draft(word: &str, meaning: &str, topic: &str) -> EntryDraft {
        EntryDraft::new(word, meaning, topic)
    }

    fn now() -> DateTime<Utc> {
        // Millisecond precision, matching what the store round-trips.
        DateTime::from_timestamp_millis(Utc::now().timestamp_millis()).unwrap()
    }

    #[test]
    fn insert_assigns_monotonic_ids_and_round_trips() {
        let store = SqliteStore::open_in_memory().unwrap();
        let t = now();

        let first = store.insert_entry(&draft("apple", "a fruit", "food"), t).unwrap();
        let second = store.insert_entry(&draft("banana", "a berry", "food"), t).unwrap();
        assert!(second > first);

        let entry = store.get_entry(first).unwrap().unwrap();
        assert_eq!(entry.word, "apple");
        assert_eq!(entry.meaning, "a fruit");
        assert_eq!(entry.topic, "food");
        assert_eq!(entry.example, "");
        assert_eq!(entry.pronunciation, None);
        assert!(!entry.is_learned);
        assert_eq!(entry.last_reviewed, t);
    }

    #[test]
    fn deleted_ids_are_never_reused() {
        let store = SqliteStore::open_in_memory().unwrap();
        let t = now();
        let first = store.insert_entry(&draft("a", "m", "t"), t).unwrap();
        store.delete_entry(first).unwrap();
        let second = store.insert_entry(&draft("b", "m", "t"), t).unwrap();
        assert!(second > first);
    }

    #[test]
    fn list_all_orders_by_word() {
        let store = SqliteStore::open_in_memory().unwrap();
        let t = now();
        store.insert_entry(&draft("cherry", "m", "food"), t).unwrap();
        store.insert_entry(&draft("apple", "m", "food"), t).unwrap();
        store.insert_entry(&draft("Banana", "m", "food"), t).unwrap();

        let words: Vec<String> = store.list_all().unwrap().into_iter().map(|e| e.word).collect();
        // BINARY collation: uppercase sorts before lowercase.
        assert_eq!(words, vec!["Banana", "apple", "cherry"]);
    }

    #[test]
    fn topic_filter_matches_exactly() {
        let store = SqliteStore::open_in_memory().unwrap();
        let t = now();
        store.insert_entry(&draft("apple", "m", "food"), t).unwrap();
        store.insert_entry(&draft("dog", "m", "animals"), t).unwrap();
        store.insert_entry(&draft("cat", "m", "Animals"), t).unwrap();

        let animals = store.list_by_topic("animals").unwrap();
        assert_eq!(animals.len(), 1);
        assert_eq!(animals[0].word, "dog");
        assert!(store.list_by_topic("plants").unwrap().is_empty());
    }

    #[test]
    fn topics_are_distinct() {
        let store = SqliteStore::open_in_memory().unwrap();
        let t = now();
        store.insert_entry(&draft("apple", "m", "food"), t).unwrap();
        store.insert_entry(&draft("banana", "m", "food"), t).unwrap();
        store.insert_entry(&draft("dog", "m", "animals"), t).unwrap();

        let mut topics = store.list_topics().unwrap();
        topics.sort();
        assert_eq!(topics, vec!["animals", "food"]);
    }

    #[test]
    fn unlearned_filter_excludes_learned_entries() {
        let store = SqliteStore::open_in_memory().unwrap();
        let t = now();
        let id = store.insert_entry(&draft("apple", "m", "food"), t).unwrap();
        store.insert_entry(&draft("banana", "m", "food"), t).unwrap();

        let mut entry = store.get_entry(id).unwrap().unwrap();
        entry.is_learned = true;
        store.update_entry(&entry).unwrap();

        let unlearned = store.list_unlearned().unwrap();
        assert_eq!(unlearned.len(), 1);
        assert_eq!(unlearned[0].word, "banana");
    }

    #[test]
    fn update_keeps_id_and_replaces_fields() {
        let store = SqliteStore::open_in_memory().unwrap();
        let t = now();
        let id = store.insert_entry(&draft("aple", "a fruit", "food"), t).unwrap();

        let mut entry = store.get_entry(id).unwrap().unwrap();
        entry.word = "apple".to_string();
        entry.pronunciation = Some("/ˈæp.əl/".to_string());
        store.update_entry(&entry).unwrap();

        let updated = store.get_entry(id).unwrap().unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.word, "apple");
        assert_eq!(updated.pronunciation.as_deref(), Some("/ˈæp.əl/"));
    }

    #[test]
    fn update_of_missing_entry_errors() {
        let store = SqliteStore::open_in_memory().unwrap();
        let entry = VocabularyEntry {
            id: 42,
            word: "ghost".to_string(),
            meaning: "m".to_string(),
            example: String::new(),
            pronunciation: None,
            topic: "t".to_string(),
            is_learned: false,
            last_reviewed: now(),
        };
        match store.update_entry(&entry) {
            Err(StoreError::EntryNotFound(42)) => {}
            other => panic!("expected EntryNotFound, got {other:?}"),
        }
    }

    #[test]
    fn delete_of_missing_entry_is_a_noop() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.delete_entry(42).unwrap();
    }

    #[test]
    fn init_progress_is_idempotent() {
        let store = SqliteStore::open_in_memory().unwrap();
        let t = now();
        assert_eq!(store.get_progress().unwrap(), None);

        store.init_progress(t).unwrap();
        store.increment_attempts().unwrap();
        store.increment_words_learned().unwrap();

        // A second initialize (e.g. on app restart) must not zero anything.
        store.init_progress(t + Duration::days(3)).unwrap();
        let progress = store.get_progress().unwrap().unwrap();
        assert_eq!(progress.total_attempts, 1);
        assert_eq!(progress.total_words_learned, 1);
        assert_eq!(progress.last_study_date, t);
    }

    #[test]
    fn increments_accumulate_exactly() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.init_progress(now()).unwrap();

        for _ in 0..5 {
            store.increment_attempts().unwrap();
        }
        store.increment_correct_answers().unwrap();
        store.increment_correct_answers().unwrap();
        store.increment_words_learned().unwrap();

        let progress = store.get_progress().unwrap().unwrap();
        assert_eq!(progress.total_attempts, 5);
        assert_eq!(progress.total_correct_answers, 2);
        assert_eq!(progress.total_words_learned, 1);
    }

    #[test]
    fn streak_extends_resets_and_holds() {
        let store = SqliteStore::open_in_memory().unwrap();
        let day0 = now();
        store.init_progress(day0).unwrap();

        // Next day: streak extends.
        let day1 = day0 + Duration::days(1);
        store.update_streak(day1).unwrap();
        let p = store.get_progress().unwrap().unwrap();
        assert_eq!(p.streak, 1);
        assert_eq!(p.last_study_date, day1);

        // Same day again: unchanged.
        store.update_streak(day1 + Duration::hours(2)).unwrap();
        assert_eq!(store.get_progress().unwrap().unwrap().streak, 1);

        // Day after: extends again.
        store.update_streak(day1 + Duration::days(1) + Duration::hours(2)).unwrap();
        assert_eq!(store.get_progress().unwrap().unwrap().streak, 2);

        // Skipping a day resets to 1.
        store.update_streak(day1 + Duration::days(4)).unwrap();
        assert_eq!(store.get_progress().unwrap().unwrap().streak, 1);
    }

    #[test]
    fn practice_history_round_trips() {
        let store = SqliteStore::open_in_memory().unwrap();
        let t = now();

        assert_eq!(store.last_practiced("apple").unwrap(), None);
        store.record_practiced("apple", t).unwrap();
        store.record_practiced("banana", t - Duration::hours(30)).unwrap();
        assert_eq!(store.last_practiced("apple").unwrap(), Some(t));

        // Replaces in place.
        store.record_practiced("apple", t + Duration::hours(1)).unwrap();
        let all = store.all_last_practiced().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all["apple"], t + Duration::hours(1));
    }
}
