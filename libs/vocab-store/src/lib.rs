//! Local persistence for the vocabulary trainer.
//!
//! SQLite-backed store with versioned migrations, live (subscribe-to-changes)
//! read queries, and the services the presentation layer drives:
//!
//! - [`VocabularyService`] — entry CRUD and live listings
//! - [`ProgressService`] — singleton aggregate counters and the study streak
//! - [`PracticeLog`] — matching-mode practice timestamps
//!
//! The [`Store`] is constructed once at startup and injected into each
//! service. Reads are live: a subscription receives every subsequent state
//! change until its handle is dropped.

pub mod error;
pub mod live;
pub mod repository;
pub mod schema;
pub mod services;
pub mod store;

pub use error::{Result, StoreError};
pub use live::LiveQuery;
pub use repository::{
    PracticeHistoryRepository, ProgressRepository, SqliteStore, VocabularyRepository,
};
pub use services::{PracticeLog, ProgressService, VocabularyService};
pub use store::{Change, Store};
