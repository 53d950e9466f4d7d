//! Score derivation and the completed-session record.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Score a session starts from before penalties.
pub const BASE_SCORE: u32 = 1000;

/// Penalty per submitted guess.
pub const ATTEMPT_PENALTY: u32 = 10;

/// Flat penalty for revealing the hint.
pub const HINT_PENALTY: u32 = 100;

/// Computes `max(0, 1000 - (attempts * 10 + hint penalty + elapsed seconds))`.
///
/// Pure and saturating: never negative, never overflows.
#[instrument]
pub fn compute_score(attempts: u32, hint_used: bool, elapsed_secs: u64) -> u32 {
    let hint_penalty = if hint_used { u64::from(HINT_PENALTY) } else { 0 };
    let penalty = u64::from(attempts)
        .saturating_mul(u64::from(ATTEMPT_PENALTY))
        .saturating_add(hint_penalty)
        .saturating_add(elapsed_secs);
    u64::from(BASE_SCORE).saturating_sub(penalty) as u32
}

/// Result of a won session, sent to the score sink.
///
/// Field names on the wire match the backend (`usedHint` is camelCase).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    nickname: String,
    score: u32,
    time: u64,
    attempts: u32,
    used_hint: bool,
}
