//! The game session state machine.
//!
//! A [`Session`] owns one [`WordChallenge`] from start to win. It tracks which
//! positions of the word are revealed, how many guesses were made, whether the
//! hint was shown, and how long the session has been running.
//!
//! ```text
//! Playing --guess completes word--> Won
//! Playing --any other guess-------> Playing
//! Playing --use_hint--------------> Playing
//! Won is terminal.
//! ```
//!
//! Time never comes from a clock inside this module. Callers pass `now` to
//! [`Session::start`], [`Session::tick`], and [`Session::submit_guess`], which
//! keeps the engine deterministic under test.

use std::time::Instant;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::challenge::{SessionSetup, WordChallenge};
use crate::invariants::assert_transition;
use crate::scoring::{ScoreRecord, compute_score};

/// Placeholder rendered for an unrevealed position.
pub const BLANK: char = '_';

/// Whether the session is still accepting guesses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIs,
)]
pub enum SessionStatus {
    /// Guesses are accepted and the timer runs.
    Playing,
    /// Every position is revealed. Terminal.
    Won,
}

/// What a single accepted guess did to the reveal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Nothing new was revealed.
    Miss,
    /// Some positions were revealed but blanks remain.
    Revealed {
        /// Number of positions revealed by this guess.
        positions: usize,
    },
    /// The word is complete; the session is now [`SessionStatus::Won`].
    Solved,
}

/// Operation rejected by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    /// The guess was empty. Attempts are not counted.
    #[display("guess cannot be empty")]
    EmptyGuess,
    /// The session is already won and accepts no further input.
    #[display("session is already won")]
    AlreadyWon,
    /// The challenge had no characters to guess.
    #[display("challenge word is empty")]
    EmptyWord,
}

/// Mutable state of one play-through.
#[derive(Debug, Clone, Getters)]
pub struct Session {
    /// Who is playing and in which category.
    setup: SessionSetup,
    /// The secret word and hint.
    #[getter(skip)]
    challenge: WordChallenge,
    /// Characters of the word, cached for positional comparison.
    #[getter(skip)]
    letters: Vec<char>,
    /// Per-position disclosure; `None` is blank.
    revealed: Vec<Option<char>>,
    /// Number of accepted guesses.
    attempts: u32,
    /// Whether the hint has been shown.
    hint_used: bool,
    /// When the challenge was received.
    started_at: Instant,
    /// Whole seconds since `started_at`, frozen at the win.
    elapsed_secs: u64,
    /// Current state machine position.
    status: SessionStatus,
    #[getter(skip)]
    record_taken: bool,
}

impl Session {
    /// Starts a session for a freshly received challenge.
    ///
    /// Every position starts blank and the status is [`SessionStatus::Playing`].
    #[instrument(skip(setup, challenge), fields(nickname = %setup.nickname(), category = %setup.category()))]
    pub fn start(
        setup: SessionSetup,
        challenge: WordChallenge,
        now: Instant,
    ) -> Result<Self, SessionError> {
        if challenge.is_empty() {
            return Err(SessionError::EmptyWord);
        }
        let letters: Vec<char> = challenge.word().chars().collect();
        info!(length = letters.len(), "Session started");
        Ok(Self {
            setup,
            revealed: vec![None; letters.len()],
            letters,
            challenge,
            attempts: 0,
            hint_used: false,
            started_at: now,
            elapsed_secs: 0,
            status: SessionStatus::Playing,
            record_taken: false,
        })
    }

    /// Submits a letter or whole-word guess.
    ///
    /// Input of exactly one character reveals every blank position holding that
    /// letter (case-insensitive). Any other input is compared against the whole
    /// word and reveals everything on a match. The input is not trimmed.
    ///
    /// Each accepted guess counts as one attempt, whether or not it reveals
    /// anything.
    #[instrument(skip(self, now), fields(attempts = self.attempts))]
    pub fn submit_guess(&mut self, input: &str, now: Instant) -> Result<GuessOutcome, SessionError> {
        if self.status.is_won() {
            return Err(SessionError::AlreadyWon);
        }
        if input.is_empty() {
            return Err(SessionError::EmptyGuess);
        }

        let before = cfg!(debug_assertions).then(|| self.clone());

        self.attempts = self.attempts.saturating_add(1);
        self.refresh_elapsed(now);

        let mut chars = input.chars();
        let newly_revealed = match (chars.next(), chars.next()) {
            (Some(letter), None) => self.reveal_letter(letter),
            _ => self.reveal_word(input),
        };

        let outcome = if self.revealed.iter().all(Option::is_some) {
            self.status = SessionStatus::Won;
            info!(
                attempts = self.attempts,
                elapsed_secs = self.elapsed_secs,
                hint_used = self.hint_used,
                "Session won"
            );
            GuessOutcome::Solved
        } else if newly_revealed > 0 {
            GuessOutcome::Revealed {
                positions: newly_revealed,
            }
        } else {
            GuessOutcome::Miss
        };

        if let Some(before) = before {
            assert_transition(&before, self);
        }

        debug!(?outcome, "Guess evaluated");
        Ok(outcome)
    }

    /// Marks the hint as used and returns its text.
    ///
    /// Calling again returns the same text and has no further scoring effect.
    #[instrument(skip(self))]
    pub fn use_hint(&mut self) -> Result<&str, SessionError> {
        if self.status.is_won() {
            return Err(SessionError::AlreadyWon);
        }
        if !self.hint_used {
            info!("Hint revealed");
            self.hint_used = true;
        }
        Ok(self.challenge.hint().as_str())
    }

    /// Recomputes elapsed seconds from `now`. No effect once won.
    ///
    /// Returns the elapsed seconds after the update.
    #[instrument(skip(self, now))]
    pub fn tick(&mut self, now: Instant) -> u64 {
        if self.status.is_playing() {
            self.refresh_elapsed(now);
        }
        self.elapsed_secs
    }

    /// Current score from attempts, hint usage, and elapsed time.
    ///
    /// Only the value at the win is ever persisted.
    pub fn compute_score(&self) -> u32 {
        compute_score(self.attempts, self.hint_used, self.elapsed_secs)
    }

    /// Returns the completed-session record exactly once after the win.
    ///
    /// Later calls, and calls while still playing, return `None`.
    #[instrument(skip(self))]
    pub fn take_score_record(&mut self) -> Option<ScoreRecord> {
        if !self.status.is_won() || self.record_taken {
            return None;
        }
        self.record_taken = true;
        let record = ScoreRecord::new(
            self.setup.nickname().clone(),
            self.compute_score(),
            self.elapsed_secs,
            self.attempts,
            self.hint_used,
        );
        info!(score = record.score(), "Score record built");
        Some(record)
    }

    /// Revealed word with blanks as `_`, one space between positions.
    pub fn revealed_display(&self) -> String {
        let mut out = String::with_capacity(self.revealed.len() * 2);
        for (i, slot) in self.revealed.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push(slot.unwrap_or(BLANK));
        }
        out
    }

    /// The hint text, only once it has been used.
    pub fn shown_hint(&self) -> Option<&str> {
        self.hint_used.then(|| self.challenge.hint().as_str())
    }

    /// The secret word, only once the session is won.
    pub fn solved_word(&self) -> Option<&str> {
        self.status.is_won().then(|| self.challenge.word().as_str())
    }

    pub(crate) fn letters(&self) -> &[char] {
        &self.letters
    }

    fn refresh_elapsed(&mut self, now: Instant) {
        let secs = now.saturating_duration_since(self.started_at).as_secs();
        self.elapsed_secs = self.elapsed_secs.max(secs);
    }

    fn reveal_letter(&mut self, letter: char) -> usize {
        let mut lower = letter.to_lowercase();
        let target = match (lower.next(), lower.next()) {
            (Some(c), None) => c,
            _ => return 0,
        };
        let mut count = 0;
        for (slot, &c) in self.revealed.iter_mut().zip(&self.letters) {
            if slot.is_none() && c == target {
                *slot = Some(c);
                count += 1;
            }
        }
        count
    }

    fn reveal_word(&mut self, input: &str) -> usize {
        if input.to_lowercase() != *self.challenge.word() {
            return 0;
        }
        let mut count = 0;
        for (slot, &c) in self.revealed.iter_mut().zip(&self.letters) {
            if slot.is_none() {
                *slot = Some(c);
                count += 1;
            }
        }
        count
    }
}
