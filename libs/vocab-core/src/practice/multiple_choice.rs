//! Multiple-choice prompt construction and scoring.

use crate::types::VocabularyEntry;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Options shown per prompt: the target meaning plus three foils.
pub const OPTION_COUNT: usize = 4;

/// One multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoicePrompt {
    /// The word being asked about.
    pub word: String,
    /// Candidate meanings in display order.
    pub options: Vec<String>,
    meaning: String,
}

impl ChoicePrompt {
    /// Build a prompt for `target`, drawing foil meanings from `pool`.
    ///
    /// Foils are distinct meanings other than the target's, drawn uniformly
    /// at random; the option list contains the target meaning exactly once
    /// and is shuffled. The list is shorter than [`OPTION_COUNT`] only when
    /// the pool cannot supply three distinct foils.
    pub fn build<R: Rng + ?Sized>(
        target: &VocabularyEntry,
        pool: &[VocabularyEntry],
        rng: &mut R,
    ) -> Self {
        let mut foils: Vec<&str> = pool
            .iter()
            .filter(|e| e.id != target.id)
            .map(|e| e.meaning.as_str())
            .filter(|m| *m != target.meaning)
            .collect();
        foils.sort_unstable();
        foils.dedup();

        let mut options: Vec<String> = foils
            .choose_multiple(rng, OPTION_COUNT - 1)
            .map(|m| m.to_string())
            .collect();
        options.push(target.meaning.clone());
        options.shuffle(rng);

        Self {
            word: target.word.clone(),
            options,
            meaning: target.meaning.clone(),
        }
    }

    /// Exact string match against the target meaning.
    pub fn is_correct(&self, selected: &str) -> bool {
        selected == self.meaning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entry(id: i64, word: &str, meaning: &str) -> VocabularyEntry {
        VocabularyEntry {
            id,
            word: word.to_string(),
            meaning: meaning.to_string(),
            example: String::new(),
            pronunciation: None,
            topic: "test".to_string(),
            is_learned: false,
            last_reviewed: Utc::now(),
        }
    }

    fn pool() -> Vec<VocabularyEntry> {
        (1..=8)
            .map(|i| entry(i, &format!("word{i}"), &format!("meaning{i}")))
            .collect()
    }

    #[test]
    fn four_options_with_target_exactly_once() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let prompt = ChoicePrompt::build(&pool[0], &pool, &mut rng);
            assert_eq!(prompt.options.len(), OPTION_COUNT);
            let hits = prompt
                .options
                .iter()
                .filter(|o| *o == &pool[0].meaning)
                .count();
            assert_eq!(hits, 1);
        }
    }

    #[test]
    fn no_duplicate_options() {
        let mut pool = pool();
        // Duplicate meanings in the pool must not produce duplicate options.
        pool.push(entry(9, "word9", "meaning2"));
        pool.push(entry(10, "word10", "meaning3"));
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let mut options = ChoicePrompt::build(&pool[0], &pool, &mut rng).options;
            options.sort();
            let before = options.len();
            options.dedup();
            assert_eq!(options.len(), before);
        }
    }

    #[test]
    fn small_pool_yields_fewer_options() {
        let pool = vec![entry(1, "a", "ma"), entry(2, "b", "mb")];
        let mut rng = StdRng::seed_from_u64(3);
        let prompt = ChoicePrompt::build(&pool[0], &pool, &mut rng);
        assert_eq!(prompt.options.len(), 2);
        assert!(prompt.options.contains(&"ma".to_string()));
    }

    #[test]
    fn correctness_is_exact_match() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(1);
        let prompt = ChoicePrompt::build(&pool[2], &pool, &mut rng);
        assert!(prompt.is_correct("meaning3"));
        assert!(!prompt.is_correct("Meaning3"));
        assert!(!prompt.is_correct("meaning4"));
    }
}
