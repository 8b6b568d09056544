//! Practice session engine.
//!
//! Stateless over the store: every constructor takes an in-memory list of
//! entries and the caller persists whatever the session reports (answer
//! outcomes, newly learned word ids, practice timestamps).

pub mod fill_blank;
pub mod flashcard;
pub mod matching;
pub mod multiple_choice;
pub mod session;

pub use fill_blank::BlankPrompt;
pub use flashcard::{CardFace, FlashcardSession};
pub use matching::{MatchOutcome, MatchingResults, MatchingSession, SESSION_POOL_SIZE};
pub use multiple_choice::{ChoicePrompt, OPTION_COUNT};
pub use session::{AnswerOutcome, PracticeSession, SessionResults, SessionState};
