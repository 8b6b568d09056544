//! Flashcard traversal with flip state and once-per-session learned marking.

use crate::error::{Result, SessionError};
use crate::types::VocabularyEntry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which side of the card is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardFace {
    Word,
    Meaning,
}

/// Sequential flashcard session.
#[derive(Debug)]
pub struct FlashcardSession {
    entries: Vec<VocabularyEntry>,
    index: usize,
    face: CardFace,
    seen: HashSet<i64>,
}

impl FlashcardSession {
    pub fn new(entries: Vec<VocabularyEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(SessionError::NoWords);
        }
        Ok(Self {
            entries,
            index: 0,
            face: CardFace::Word,
            seen: HashSet::new(),
        })
    }

    pub fn current(&self) -> &VocabularyEntry {
        &self.entries[self.index]
    }

    pub fn face(&self) -> CardFace {
        self.face
    }

    /// Toggle between word and meaning face.
    pub fn flip(&mut self) {
        self.face = match self.face {
            CardFace::Word => CardFace::Meaning,
            CardFace::Meaning => CardFace::Word,
        };
    }

    /// Advance to the next card, resetting to the word face. Returns false
    /// when already on the last card.
    pub fn next(&mut self) -> bool {
        self.face = CardFace::Word;
        if self.index + 1 < self.entries.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Go back one card, resetting to the word face. Returns false when
    /// already on the first card.
    pub fn prev(&mut self) -> bool {
        self.face = CardFace::Word;
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Mark the current card as learned. Reports the word id the first time
    /// only; repeat marks within the session return None.
    pub fn mark_learned(&mut self) -> Option<i64> {
        let id = self.current().id;
        self.seen.insert(id).then_some(id)
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.entries.len()
    }

    /// Word ids marked learned this session.
    pub fn learned_ids(&self) -> &HashSet<i64> {
        &self.seen
    }
}
