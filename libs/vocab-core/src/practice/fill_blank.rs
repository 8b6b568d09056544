//! Fill-in-blank prompts: show the meaning, type the word.

use crate::types::VocabularyEntry;
use serde::{Deserialize, Serialize};

/// One fill-in-blank question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlankPrompt {
    /// The meaning shown to the user.
    pub meaning: String,
    word: String,
}

impl BlankPrompt {
    pub fn new(entry: &VocabularyEntry) -> Self {
        Self {
            meaning: entry.meaning.clone(),
            word: entry.word.clone(),
        }
    }

    /// Whitespace-trimmed, case-insensitive comparison with the target word.
    pub fn check(&self, input: &str) -> bool {
        input.trim().to_lowercase() == self.word.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn prompt(word: &str) -> BlankPrompt {
        BlankPrompt::new(&VocabularyEntry {
            id: 1,
            word: word.to_string(),
            meaning: "a fruit".to_string(),
            example: String::new(),
            pronunciation: None,
            topic: "food".to_string(),
            is_learned: false,
            last_reviewed: Utc::now(),
        })
    }

    #[test]
    fn trims_and_ignores_case() {
        let p = prompt("apple");
        assert!(p.check(" Apple "));
        assert!(p.check("APPLE"));
        assert!(p.check("apple"));
    }

    #[test]
    fn rejects_wrong_word() {
        let p = prompt("apple");
        assert!(!p.check("apples"));
        assert!(!p.check(""));
    }

    #[test]
    fn handles_non_ascii() {
        let p = prompt("Äpfel");
        assert!(p.check("äpfel "));
    }
}
