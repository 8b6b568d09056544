//! Per-session state machine for the sequential practice modes.
//!
//! Drives multiple choice and fill-in-blank: one entry at a time, a running
//! score, and a seen-set so a word is reported as newly learned at most once
//! per session no matter how often it is answered correctly.

use crate::error::{Result, SessionError};
use crate::types::{PracticeMode, VocabularyEntry};
use serde::Serialize;
use std::collections::HashSet;

/// What one answered prompt means for the caller: whether to count a correct
/// answer, whether to count a newly learned word, and whether the session
/// just finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// Set the first time this word is answered correctly in the session;
    /// the caller increments the words-learned counter exactly then.
    pub newly_learned: Option<i64>,
    pub finished: bool,
}

/// Summary shown on the results screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResults {
    pub score: usize,
    pub total: usize,
    pub learned_word_ids: HashSet<i64>,
}

/// A running sequential session.
#[derive(Debug)]
pub struct PracticeSession {
    mode: PracticeMode,
    entries: Vec<VocabularyEntry>,
    index: usize,
    score: usize,
    seen: HashSet<i64>,
}

impl PracticeSession {
    pub fn start(mode: PracticeMode, entries: Vec<VocabularyEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(SessionError::NoWords);
        }
        Ok(Self {
            mode,
            entries,
            index: 0,
            score: 0,
            seen: HashSet::new(),
        })
    }

    pub fn mode(&self) -> PracticeMode {
        self.mode
    }

    /// Entry the current prompt is built from; None once finished.
    pub fn current(&self) -> Option<&VocabularyEntry> {
        self.entries.get(self.index)
    }

    pub fn position(&self) -> (usize, usize) {
        (self.index, self.entries.len())
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.entries.len()
    }

    /// Record the result of the current prompt and advance.
    pub fn answer(&mut self, correct: bool) -> Result<AnswerOutcome> {
        let entry = self.entries.get(self.index).ok_or(SessionError::Finished)?;
        let id = entry.id;

        let newly_learned = if correct && self.seen.insert(id) {
            self.score += 1;
            Some(id)
        } else {
            None
        };

        self.index += 1;
        Ok(AnswerOutcome {
            correct,
            newly_learned,
            finished: self.is_finished(),
        })
    }

    /// Results once the session has finished.
    pub fn results(&self) -> Option<SessionResults> {
        self.is_finished().then(|| SessionResults {
            score: self.score,
            total: self.entries.len(),
            learned_word_ids: self.seen.clone(),
        })
    }
}

/// The full session lifecycle: `SelectingMode -> InProgress -> Results`,
/// with an explicit restart back to mode selection.
#[derive(Debug, Default)]
pub enum SessionState {
    #[default]
    SelectingMode,
    InProgress(PracticeSession),
    Results(SessionResults),
}

impl SessionState {
    /// Transition `SelectingMode -> InProgress`.
    pub fn select(&mut self, mode: PracticeMode, entries: Vec<VocabularyEntry>) -> Result<()> {
        *self = Self::InProgress(PracticeSession::start(mode, entries)?);
        Ok(())
    }

    /// Answer the current prompt; moves to `Results` when the last entry has
    /// been answered.
    pub fn answer(&mut self, correct: bool) -> Result<AnswerOutcome> {
        let session = match self {
            Self::InProgress(s) => s,
            _ => return Err(SessionError::Finished),
        };
        let outcome = session.answer(correct)?;
        if outcome.finished {
            let results = session.results().ok_or(SessionError::Finished)?;
            *self = Self::Results(results);
        }
        Ok(outcome)
    }

    /// Transition back to mode selection, discarding all session state.
    pub fn restart(&mut self) {
        *self = Self::SelectingMode;
    }
}
