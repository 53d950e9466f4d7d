//! Tests for the session state machine.

use std::time::{Duration, Instant};

use wordgame_core::invariants::check_transition;
use wordgame_core::{
    GuessOutcome, Session, SessionError, SessionParameter, SessionSetup, SessionStatus,
    WordChallenge, compute_score,
};

fn apple_session(start: Instant) -> Session {
    let setup = SessionSetup::new("ann", "fruit").expect("valid setup");
    Session::start(setup, WordChallenge::new("apple", "a fruit"), start).expect("start")
}

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

#[test]
fn test_new_session_is_all_blank() {
    let session = apple_session(Instant::now());
    assert_eq!(session.revealed_display(), "_ _ _ _ _");
    assert_eq!(*session.attempts(), 0);
    assert!(!session.hint_used());
    assert_eq!(*session.status(), SessionStatus::Playing);
}

#[test]
fn test_letter_by_letter_win() {
    let start = Instant::now();
    let mut session = apple_session(start);

    assert_eq!(
        session.submit_guess("a", start + secs(2)),
        Ok(GuessOutcome::Revealed { positions: 1 })
    );
    assert_eq!(session.revealed_display(), "a _ _ _ _");

    assert_eq!(
        session.submit_guess("p", start + secs(5)),
        Ok(GuessOutcome::Revealed { positions: 2 })
    );
    assert_eq!(session.revealed_display(), "a p p _ _");

    session.submit_guess("e", start + secs(9)).expect("guess");
    assert_eq!(session.revealed_display(), "a p p _ e");

    assert_eq!(
        session.submit_guess("l", start + secs(12)),
        Ok(GuessOutcome::Solved)
    );
    assert_eq!(session.revealed_display(), "a p p l e");
    assert_eq!(*session.status(), SessionStatus::Won);
    assert_eq!(*session.attempts(), 4);
    assert!(!session.hint_used());
    assert_eq!(*session.elapsed_secs(), 12);
    assert_eq!(session.compute_score(), 948);
}

#[test]
fn test_mixed_case_whole_word_wins_in_one_attempt() {
    let start = Instant::now();
    let mut session = apple_session(start);

    assert_eq!(session.submit_guess("APPLE", start), Ok(GuessOutcome::Solved));
    assert_eq!(session.revealed_display(), "a p p l e");
    assert_eq!(*session.attempts(), 1);
    assert_eq!(session.solved_word(), Some("apple"));
}

#[test]
fn test_hint_then_win_scores_850() {
    let start = Instant::now();
    let mut session = apple_session(start);

    assert_eq!(session.use_hint(), Ok("a fruit"));
    session.submit_guess("x", start + secs(4)).expect("guess");
    session.submit_guess("apply", start + secs(10)).expect("guess");
    session.submit_guess("apple", start + secs(20)).expect("guess");

    assert_eq!(*session.attempts(), 3);
    assert_eq!(session.compute_score(), 850);
}

#[test]
fn test_repeated_letter_is_idempotent() {
    let start = Instant::now();
    let mut session = apple_session(start);

    session.submit_guess("p", start).expect("guess");
    let after_first = session.revealed().clone();

    assert_eq!(session.submit_guess("p", start), Ok(GuessOutcome::Miss));
    assert_eq!(session.revealed(), &after_first);
    assert_eq!(*session.attempts(), 2);
}

#[test]
fn test_uppercase_letter_matches() {
    let start = Instant::now();
    let mut session = apple_session(start);
    session.submit_guess("P", start).expect("guess");
    assert_eq!(session.revealed_display(), "_ p p _ _");
}

#[test]
fn test_attempts_count_every_guess() {
    let start = Instant::now();
    let mut session = apple_session(start);
    let guesses = ["z", "q", "pear", "ap", " ", "a", "a"];
    for guess in guesses {
        session.submit_guess(guess, start).expect("guess");
    }
    assert_eq!(*session.attempts(), guesses.len() as u32);
}

#[test]
fn test_two_letters_is_a_whole_word_guess() {
    let start = Instant::now();
    let mut session = apple_session(start);
    assert_eq!(session.submit_guess("ap", start), Ok(GuessOutcome::Miss));
    assert_eq!(session.revealed_display(), "_ _ _ _ _");
}

#[test]
fn test_input_is_not_trimmed() {
    let start = Instant::now();
    let mut session = apple_session(start);
    assert_eq!(session.submit_guess(" apple", start), Ok(GuessOutcome::Miss));
    assert_eq!(session.submit_guess("a ", start), Ok(GuessOutcome::Miss));
    assert_eq!(*session.status(), SessionStatus::Playing);
}

#[test]
fn test_empty_guess_rejected_without_counting() {
    let start = Instant::now();
    let mut session = apple_session(start);
    assert_eq!(session.submit_guess("", start), Err(SessionError::EmptyGuess));
    assert_eq!(*session.attempts(), 0);
}

#[test]
fn test_won_session_is_terminal() {
    let start = Instant::now();
    let mut session = apple_session(start);
    session.submit_guess("apple", start + secs(3)).expect("guess");

    assert_eq!(
        session.submit_guess("a", start + secs(30)),
        Err(SessionError::AlreadyWon)
    );
    assert_eq!(session.use_hint(), Err(SessionError::AlreadyWon));
    assert_eq!(*session.attempts(), 1);
    assert!(!session.hint_used());
}

#[test]
fn test_hint_is_monotonic() {
    let mut session = apple_session(Instant::now());
    assert_eq!(session.shown_hint(), None);
    session.use_hint().expect("hint");
    assert!(*session.hint_used());
    for _ in 0..5 {
        assert_eq!(session.use_hint(), Ok("a fruit"));
        assert!(*session.hint_used());
    }
    assert_eq!(session.shown_hint(), Some("a fruit"));
    assert_eq!(session.compute_score(), 900);
}

#[test]
fn test_hint_does_not_reveal() {
    let mut session = apple_session(Instant::now());
    session.use_hint().expect("hint");
    assert_eq!(session.revealed_display(), "_ _ _ _ _");
    assert_eq!(*session.attempts(), 0);
}

#[test]
fn test_tick_is_monotonic_and_frozen_at_win() {
    let start = Instant::now();
    let mut session = apple_session(start);

    assert_eq!(session.tick(start + Duration::from_millis(1500)), 1);
    assert_eq!(session.tick(start + secs(7)), 7);
    // A stale instant never moves time backwards.
    assert_eq!(session.tick(start + secs(3)), 7);

    session.submit_guess("apple", start + secs(8)).expect("guess");
    assert_eq!(session.tick(start + secs(60)), 8);
    assert_eq!(*session.elapsed_secs(), 8);
}

#[test]
fn test_score_record_emitted_once() {
    let start = Instant::now();
    let mut session = apple_session(start);
    assert!(session.take_score_record().is_none());

    session.use_hint().expect("hint");
    session.submit_guess("apple", start + secs(20)).expect("guess");

    let record = session.take_score_record().expect("record after win");
    assert_eq!(record.nickname(), "ann");
    assert_eq!(*record.score(), 1000 - (10 + 100 + 20));
    assert_eq!(*record.time(), 20);
    assert_eq!(*record.attempts(), 1);
    assert!(*record.used_hint());

    assert!(session.take_score_record().is_none());
}

#[test]
fn test_single_letter_word() {
    let start = Instant::now();
    let setup = SessionSetup::new("ann", "letters").expect("setup");
    let mut session = Session::start(setup, WordChallenge::new("A", "first"), start).expect("start");
    assert_eq!(session.submit_guess("a", start), Ok(GuessOutcome::Solved));
}

#[test]
fn test_empty_word_never_starts() {
    let setup = SessionSetup::new("ann", "fruit").expect("setup");
    let result = Session::start(setup, WordChallenge::new("", "nothing"), Instant::now());
    assert!(matches!(result, Err(SessionError::EmptyWord)));
}

#[test]
fn test_setup_requires_both_parameters() {
    let err = SessionSetup::new("", "fruit").expect_err("empty nickname");
    assert_eq!(err.parameter, SessionParameter::Nickname);
    let err = SessionSetup::new("ann", "").expect_err("empty category");
    assert_eq!(err.parameter, SessionParameter::Category);
}

#[test]
fn test_challenge_deserializes_lowercase_and_ignores_extra_fields() {
    let challenge: WordChallenge = serde_json::from_str(
        r#"{"category":"fruit","word":"Apple","hint":"a fruit"}"#,
    )
    .expect("deserialize");
    assert_eq!(challenge.word(), "apple");
    assert_eq!(challenge.hint(), "a fruit");
}

#[test]
fn test_score_is_monotonic_in_every_penalty() {
    for attempts in 0..40u32 {
        for elapsed in (0..1200u64).step_by(37) {
            let base = compute_score(attempts, false, elapsed);
            assert!(compute_score(attempts + 1, false, elapsed) <= base);
            assert!(compute_score(attempts, false, elapsed + 1) <= base);
            assert!(compute_score(attempts, true, elapsed) <= base);
        }
    }
}

#[test]
fn test_transitions_hold_invariants() {
    let start = Instant::now();
    let mut session = apple_session(start);
    for (i, guess) in ["x", "a", "p", "pp", "e", "l"].iter().enumerate() {
        let before = session.clone();
        session
            .submit_guess(guess, start + secs(i as u64))
            .expect("guess");
        assert_eq!(check_transition(&before, &session), Ok(()));
    }
    assert_eq!(*session.status(), SessionStatus::Won);
}

#[test]
fn test_invariants_detect_regression() {
    let start = Instant::now();
    let mut before = apple_session(start);
    before.use_hint().expect("hint");
    let after = apple_session(start);
    let violations = check_transition(&before, &after).expect_err("hint went back to false");
    assert_eq!(violations.len(), 1);
}
