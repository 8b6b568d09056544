//! Matching mode: pair words with their meanings.
//!
//! The session pool prefers words that are due (not practiced within the
//! last 24 hours) and tops up from recently practiced words when fewer than
//! ten are due. The caller persists the practice timestamp reported on each
//! match.

use crate::error::{Result, SessionError};
use crate::types::VocabularyEntry;
use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Maximum words per matching session.
pub const SESSION_POOL_SIZE: usize = 10;

/// A word is due when it has not been practiced within this window.
pub const DUE_WINDOW_HOURS: i64 = 24;

/// Outcome of a word or meaning selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Both sides were selected and they match. The caller records the
    /// practice timestamp for `word`.
    Matched { word_id: i64, word: String },
    /// Both sides were selected but they do not match; selections cleared.
    Mismatch,
    /// Waiting for the other side to be selected.
    Pending,
}

/// Summary of a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchingResults {
    pub correct_count: usize,
    pub matched_word_ids: HashSet<i64>,
}

/// In-progress matching session.
#[derive(Debug)]
pub struct MatchingSession {
    words: Vec<VocabularyEntry>,
    meanings: Vec<String>,
    matched: HashSet<i64>,
    selected_word: Option<i64>,
    selected_meaning: Option<String>,
}

impl MatchingSession {
    /// Build the session pool from `entries` and the per-word practice
    /// history: due words first, capped at [`SESSION_POOL_SIZE`], topped up
    /// from shuffled recent words. Words and meanings are shuffled
    /// independently for display.
    pub fn new<R: Rng + ?Sized>(
        entries: &[VocabularyEntry],
        history: &HashMap<String, DateTime<Utc>>,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Self> {
        if entries.is_empty() {
            return Err(SessionError::NoWords);
        }

        let cutoff = now - Duration::hours(DUE_WINDOW_HOURS);
        let (due, recent): (Vec<_>, Vec<_>) = entries
            .iter()
            .cloned()
            .partition(|e| history.get(&e.word).map_or(true, |t| *t < cutoff));

        let mut pool: Vec<VocabularyEntry> = due.into_iter().take(SESSION_POOL_SIZE).collect();
        if pool.len() < SESSION_POOL_SIZE {
            let mut rest = recent;
            rest.shuffle(rng);
            pool.extend(rest.into_iter().take(SESSION_POOL_SIZE - pool.len()));
        }
        pool.shuffle(rng);

        let mut meanings: Vec<String> = pool.iter().map(|e| e.meaning.clone()).collect();
        meanings.shuffle(rng);

        Ok(Self {
            words: pool,
            meanings,
            matched: HashSet::new(),
            selected_word: None,
            selected_meaning: None,
        })
    }

    pub fn pool_size(&self) -> usize {
        self.words.len()
    }

    /// Unmatched words in display order.
    pub fn remaining_words(&self) -> impl Iterator<Item = &VocabularyEntry> {
        self.words.iter().filter(|e| !self.matched.contains(&e.id))
    }

    /// Unmatched meanings in display order.
    pub fn remaining_meanings(&self) -> impl Iterator<Item = &str> {
        self.meanings.iter().map(String::as_str)
    }

    /// Select a word by id. Selecting an unknown or already-matched word is
    /// ignored.
    pub fn select_word(&mut self, id: i64) -> MatchOutcome {
        if self.matched.contains(&id) || !self.words.iter().any(|e| e.id == id) {
            return MatchOutcome::Pending;
        }
        self.selected_word = Some(id);
        self.resolve()
    }

    /// Select a meaning from the meanings column.
    pub fn select_meaning(&mut self, meaning: &str) -> MatchOutcome {
        if !self.meanings.iter().any(|m| m == meaning) {
            return MatchOutcome::Pending;
        }
        self.selected_meaning = Some(meaning.to_string());
        self.resolve()
    }

    fn resolve(&mut self) -> MatchOutcome {
        let (word_id, meaning) = match (self.selected_word, self.selected_meaning.as_deref()) {
            (Some(w), Some(m)) => (w, m.to_string()),
            _ => return MatchOutcome::Pending,
        };
        self.selected_word = None;
        self.selected_meaning = None;

        let word = self
            .words
            .iter()
            .find(|e| e.id == word_id)
            .map(|e| (e.word.clone(), e.meaning.clone()));
        match word {
            Some((word, word_meaning)) if word_meaning == meaning => {
                self.matched.insert(word_id);
                // Remove one occurrence so duplicate meanings stay available.
                if let Some(pos) = self.meanings.iter().position(|m| *m == meaning) {
                    self.meanings.remove(pos);
                }
                MatchOutcome::Matched { word_id, word }
            }
            _ => MatchOutcome::Mismatch,
        }
    }

    /// True once every word in the pool has been matched.
    pub fn is_complete(&self) -> bool {
        self.matched.len() == self.words.len()
    }

    pub fn results(&self) -> MatchingResults {
        MatchingResults {
            correct_count: self.matched.len(),
            matched_word_ids: self.matched.clone(),
        }
    }
}
