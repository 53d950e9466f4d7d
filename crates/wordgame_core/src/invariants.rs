//! First-class invariants for word-guessing sessions.
//!
//! State invariants hold for every [`Session`] value. Transition invariants hold
//! between a session before and after one operation. Both are checked in debug
//! builds after every guess and can be tested on their own.

use tracing::error;

use crate::session::Session;

/// A logical property that must hold for a given state.
pub trait Invariant<S: ?Sized> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
pub trait InvariantSet<S: ?Sized> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S: ?Sized, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// A session before and after one operation.
#[derive(Debug, Clone, Copy)]
pub struct Transition<'a> {
    /// State before the operation.
    pub before: &'a Session,
    /// State after the operation.
    pub after: &'a Session,
}

/// Invariant: every revealed position shows the word's character at that
/// position, and the reveal vector is as long as the word.
pub struct RevealMatchesWord;

impl Invariant<Session> for RevealMatchesWord {
    fn holds(session: &Session) -> bool {
        let letters = session.letters();
        session.revealed().len() == letters.len()
            && session
                .revealed()
                .iter()
                .zip(letters)
                .all(|(slot, c)| slot.is_none_or(|r| r == *c))
    }

    fn description() -> &'static str {
        "Revealed positions match the word"
    }
}

/// Invariant: won sessions have no blank positions, playing sessions have at
/// least one.
pub struct StatusMatchesReveal;

impl Invariant<Session> for StatusMatchesReveal {
    fn holds(session: &Session) -> bool {
        let complete = session.revealed().iter().all(Option::is_some);
        complete == session.status().is_won()
    }

    fn description() -> &'static str {
        "Status is Won exactly when no blanks remain"
    }
}

/// Invariant: attempts, hint usage, elapsed time, and revealed positions only
/// ever move forward.
pub struct MonotonicProgress;

impl<'a> Invariant<Transition<'a>> for MonotonicProgress {
    fn holds(t: &Transition<'a>) -> bool {
        let (before, after) = (t.before, t.after);
        let reveals_kept = before
            .revealed()
            .iter()
            .zip(after.revealed())
            .all(|(b, a)| b.is_none() || b == a);
        after.attempts() >= before.attempts()
            && (!before.hint_used() || *after.hint_used())
            && after.elapsed_secs() >= before.elapsed_secs()
            && reveals_kept
    }

    fn description() -> &'static str {
        "Attempts, hint usage, elapsed time and reveals are monotonic"
    }
}

/// Invariant: nothing changes once a session is won.
pub struct FrozenOnceWon;

impl<'a> Invariant<Transition<'a>> for FrozenOnceWon {
    fn holds(t: &Transition<'a>) -> bool {
        let (before, after) = (t.before, t.after);
        if before.status().is_playing() {
            return true;
        }
        after.status().is_won()
            && after.attempts() == before.attempts()
            && after.elapsed_secs() == before.elapsed_secs()
            && after.hint_used() == before.hint_used()
    }

    fn description() -> &'static str {
        "Won sessions are frozen"
    }
}

/// Checks all session invariants across one transition.
pub fn check_transition(before: &Session, after: &Session) -> Result<(), Vec<InvariantViolation>> {
    let transition = Transition { before, after };
    let mut violations = Vec::new();
    if let Err(v) = <(RevealMatchesWord, StatusMatchesReveal)>::check_all(after) {
        violations.extend(v);
    }
    if let Err(v) = <(MonotonicProgress, FrozenOnceWon)>::check_all(&transition) {
        violations.extend(v);
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Panics in debug builds if any invariant is violated.
pub(crate) fn assert_transition(before: &Session, after: &Session) {
    if let Err(violations) = check_transition(before, after) {
        error!(?violations, "Session invariant violated");
        debug_assert!(false, "Session invariants violated: {:?}", violations);
    }
}
