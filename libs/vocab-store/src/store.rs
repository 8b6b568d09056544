//! Shared store handle with change notifications.
//!
//! The store is constructed explicitly at startup and injected into the
//! services; there is no global instance. Every successful write publishes
//! which table it touched so live queries can refresh.

use crate::error::Result;
use crate::live::LiveQuery;
use crate::repository::SqliteStore;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

/// Which table a write touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Vocabulary,
    Progress,
    PracticeHistory,
}

/// Cloneable handle to the single SQLite store plus the change feed that
/// live queries subscribe to.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Mutex<SqliteStore>>,
    changes: broadcast::Sender<Change>,
}

impl Store {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_repo(SqliteStore::open(path)?))
    }

    /// In-memory store (for testing).
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::from_repo(SqliteStore::open_in_memory()?))
    }

    fn from_repo(repo: SqliteStore) -> Self {
        let (changes, _) = broadcast::channel(64);
        Self {
            inner: Arc::new(Mutex::new(repo)),
            changes,
        }
    }

    /// Run a read against the store.
    pub fn read<T>(&self, f: impl FnOnce(&SqliteStore) -> Result<T>) -> Result<T> {
        let repo = self.inner.lock().expect("store lock");
        f(&repo)
    }

    /// Run a write; on success, wake the live queries watching `change`.
    pub fn write<T>(&self, change: Change, f: impl FnOnce(&SqliteStore) -> Result<T>) -> Result<T> {
        let out = {
            let repo = self.inner.lock().expect("store lock");
            f(&repo)?
        };
        // No subscribers is fine.
        let _ = self.changes.send(change);
        Ok(out)
    }

    /// Subscribe to a query: an initial snapshot now, then a fresh snapshot
    /// after every write touching `change` that alters the result.
    ///
    /// Must be called from within a tokio runtime; the refresh task is
    /// cancelled when the returned handle is dropped.
    pub fn watch<T, F>(&self, change: Change, query: F) -> Result<LiveQuery<T>>
    where
        T: Clone + PartialEq + Send + Sync + 'static,
        F: Fn(&SqliteStore) -> Result<T> + Send + 'static,
    {
        // Subscribe before the initial read so no write slips between them.
        let events = self.changes.subscribe();
        let initial = self.read(&query)?;
        Ok(LiveQuery::spawn(self.clone(), events, change, query, initial))
    }
}
