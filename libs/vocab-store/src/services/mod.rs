//! Services driven by the presentation layer.

pub mod practice_log;
pub mod progress;
pub mod vocabulary;

pub use practice_log::PracticeLog;
pub use progress::ProgressService;
pub use vocabulary::VocabularyService;
