//! Pure game logic for the word-guessing game.
//!
//! # Architecture
//!
//! - **Challenge**: the secret word and hint issued for one session
//! - **Session**: reveal state, attempts, hint usage, elapsed time, win detection
//! - **Scoring**: the score formula and the record sent to the leaderboard
//! - **Word entries**: catalog entries and the validation applied before upload
//! - **Invariants**: properties checked after every session transition
//!
//! Nothing here performs I/O or reads a clock. Callers supply `Instant`s.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use wordgame_core::{GuessOutcome, Session, SessionSetup, WordChallenge};
//!
//! let start = Instant::now();
//! let setup = SessionSetup::new("ann", "fruit").unwrap();
//! let mut session = Session::start(setup, WordChallenge::new("kiwi", "green"), start).unwrap();
//!
//! session.submit_guess("k", start).unwrap();
//! let outcome = session.submit_guess("KIWI", start + Duration::from_secs(5)).unwrap();
//! assert_eq!(outcome, GuessOutcome::Solved);
//! assert_eq!(session.compute_score(), 1000 - (20 + 5));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod challenge;
pub mod invariants;
mod scoring;
mod session;
mod word_entry;

pub use challenge::{MissingParameter, SessionParameter, SessionSetup, WordChallenge};
pub use scoring::{ATTEMPT_PENALTY, BASE_SCORE, HINT_PENALTY, ScoreRecord, compute_score};
pub use session::{BLANK, GuessOutcome, Session, SessionError, SessionStatus};
pub use word_entry::{ValidationError, WordEntry};

/// One row of the leaderboard. Same shape as a submitted [`ScoreRecord`].
pub type LeaderboardEntry = ScoreRecord;
