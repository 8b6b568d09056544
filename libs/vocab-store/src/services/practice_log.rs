//! Matching-mode practice history.
//!
//! Kept apart from the vocabulary and progress tables, mirroring the
//! source system where these timestamps live in their own key-value store;
//! there is no transactional coupling to the other writes.

use crate::error::Result;
use crate::live::LiveQuery;
use crate::repository::PracticeHistoryRepository;
use crate::store::{Change, Store};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[derive(Clone)]
pub struct PracticeLog {
    store: Store,
}

impl PracticeLog {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Word -> last-practiced map, as the matching engine consumes it.
    pub fn snapshot(&self) -> Result<HashMap<String, DateTime<Utc>>> {
        self.store.read(|repo| repo.all_last_practiced())
    }

    /// Live view of the same map.
    pub fn observe(&self) -> Result<LiveQuery<HashMap<String, DateTime<Utc>>>> {
        self.store
            .watch(Change::PracticeHistory, |repo| repo.all_last_practiced())
    }

    /// Record that `word` was practiced at `at` (called on every match).
    pub async fn record(&self, word: &str, at: DateTime<Utc>) -> Result<()> {
        self.store
            .write(Change::PracticeHistory, |repo| repo.record_practiced(word, at))
    }
}
