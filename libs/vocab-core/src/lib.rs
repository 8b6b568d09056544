//! Core vocabulary-trainer library, free of storage and UI concerns.
//!
//! Provides:
//! - Shared domain types (VocabularyEntry, ProgressRecord, PracticeMode)
//! - The practice session engine: multiple choice, fill-in-blank, matching,
//!   flashcards
//! - A per-session state machine with once-per-word learned tracking

pub mod error;
pub mod practice;
pub mod types;

pub use error::{Result, SessionError};
pub use practice::{
    AnswerOutcome, BlankPrompt, CardFace, ChoicePrompt, FlashcardSession, MatchOutcome,
    MatchingResults, MatchingSession, PracticeSession, SessionResults, SessionState,
};
pub use types::{EntryDraft, PracticeMode, ProgressRecord, VocabularyEntry};
