//! Core types shared by the practice engine and the persistence layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A vocabulary entry as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub id: i64,
    pub word: String,
    pub meaning: String,
    /// Usage sentence; may be empty.
    pub example: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    /// Free-form category label.
    pub topic: String,
    pub is_learned: bool,
    pub last_reviewed: DateTime<Utc>,
}

/// A vocabulary entry before the store has assigned an id.
///
/// `word`, `meaning` and `topic` are required to be non-empty by the
/// presentation layer; no validation happens below it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub word: String,
    pub meaning: String,
    pub example: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    pub topic: String,
}

impl EntryDraft {
    /// Draft with empty example and no pronunciation.
    pub fn new(word: impl Into<String>, meaning: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
            example: String::new(),
            pronunciation: None,
            topic: topic.into(),
        }
    }
}

/// App-wide learning statistics; a single record exists after initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub total_words_learned: u32,
    pub total_correct_answers: u32,
    pub total_attempts: u32,
    /// Timestamp of the last streak update.
    pub last_study_date: DateTime<Utc>,
    /// Consecutive-day counter.
    pub streak: u32,
}

/// Practice mode options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeMode {
    MultipleChoice,
    FillInBlank,
    Matching,
    Flashcard,
}
