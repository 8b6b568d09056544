//! Vocabulary CRUD and live listings.

use crate::error::Result;
use crate::live::LiveQuery;
use crate::repository::VocabularyRepository;
use crate::store::{Change, Store};
use chrono::Utc;
use vocab_core::types::{EntryDraft, VocabularyEntry};

/// Pass-through service shaping vocabulary queries. Validation of required
/// fields happens above this layer; writes are durable once they return.
#[derive(Clone)]
pub struct VocabularyService {
    store: Store,
}

impl VocabularyService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// All entries, ordered by word ascending.
    pub fn list_all(&self) -> Result<LiveQuery<Vec<VocabularyEntry>>> {
        self.store.watch(Change::Vocabulary, |repo| repo.list_all())
    }

    /// Entries whose topic matches exactly.
    pub fn list_by_topic(&self, topic: &str) -> Result<LiveQuery<Vec<VocabularyEntry>>> {
        let topic = topic.to_string();
        self.store
            .watch(Change::Vocabulary, move |repo| repo.list_by_topic(&topic))
    }

    pub fn list_unlearned(&self) -> Result<LiveQuery<Vec<VocabularyEntry>>> {
        self.store.watch(Change::Vocabulary, |repo| repo.list_unlearned())
    }

    /// Distinct topic labels.
    pub fn list_topics(&self) -> Result<LiveQuery<Vec<String>>> {
        self.store.watch(Change::Vocabulary, |repo| repo.list_topics())
    }

    /// Insert a new entry; returns the assigned id.
    pub async fn add(&self, draft: EntryDraft) -> Result<i64> {
        self.store
            .write(Change::Vocabulary, |repo| repo.insert_entry(&draft, Utc::now()))
    }

    pub async fn update(&self, entry: VocabularyEntry) -> Result<()> {
        self.store
            .write(Change::Vocabulary, |repo| repo.update_entry(&entry))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store
            .write(Change::Vocabulary, |repo| repo.delete_entry(id))
    }
}
