//! Aggregate learning-progress counters and streak updates.

use crate::error::Result;
use crate::live::LiveQuery;
use crate::repository::ProgressRepository;
use crate::store::{Change, Store};
use chrono::{DateTime, Utc};
use vocab_core::types::ProgressRecord;

/// Service over the singleton progress row.
#[derive(Clone)]
pub struct ProgressService {
    store: Store,
}

impl ProgressService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Ensure the progress row exists. Idempotent: a second call never
    /// resets counters accumulated by earlier sessions.
    pub async fn initialize(&self) -> Result<()> {
        self.store
            .write(Change::Progress, |repo| repo.init_progress(Utc::now()))
    }

    /// Live view of the progress record; None before initialization.
    pub fn observe(&self) -> Result<LiveQuery<Option<ProgressRecord>>> {
        self.store.watch(Change::Progress, |repo| repo.get_progress())
    }

    pub async fn increment_words_learned(&self) -> Result<()> {
        self.store
            .write(Change::Progress, |repo| repo.increment_words_learned())
    }

    pub async fn increment_correct_answers(&self) -> Result<()> {
        self.store
            .write(Change::Progress, |repo| repo.increment_correct_answers())
    }

    pub async fn increment_attempts(&self) -> Result<()> {
        self.store
            .write(Change::Progress, |repo| repo.increment_attempts())
    }

    pub async fn update_streak(&self, now: DateTime<Utc>) -> Result<()> {
        self.store
            .write(Change::Progress, |repo| repo.update_streak(now))
    }

    /// Bookkeeping for one answered prompt: attempts always, correct answers
    /// when right, and a streak touch.
    pub async fn record_answer(&self, correct: bool, now: DateTime<Utc>) -> Result<()> {
        self.store.write(Change::Progress, |repo| {
            repo.increment_attempts()?;
            if correct {
                repo.increment_correct_answers()?;
            }
            repo.update_streak(now)
        })
    }
}
