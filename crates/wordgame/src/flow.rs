//! Session lifecycle around the pure engine: acquisition, ticking, finalizing.

use std::time::Duration;

use derive_getters::Getters;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument, warn};
use wordgame_core::{GuessOutcome, ScoreRecord, Session, SessionError, SessionSetup};

use crate::api::{ScoreSink, WordSource};
use crate::error::ClientError;
use crate::tick::{TickEvent, TickHandle, next_session_id};

/// Result of handing a record to the score sink.
///
/// Either way the player moves on to the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishOutcome {
    /// The sink accepted the record.
    Saved,
    /// The record was not stored. Carries the warning to show.
    NotSaved(String),
}

/// Current instant on tokio's clock, which tests can pause.
pub fn now() -> std::time::Instant {
    tokio::time::Instant::now().into_std()
}

/// Requests a challenge for the setup's category and starts a session.
///
/// On failure no session exists and the caller must not enter the game view.
#[instrument(skip(source), fields(nickname = %setup.nickname(), category = %setup.category()))]
pub async fn start_session(
    source: &dyn WordSource,
    setup: SessionSetup,
) -> Result<Session, ClientError> {
    let challenge = source.random_word(setup.category()).await.map_err(|e| {
        warn!(error = %e, "Challenge acquisition failed");
        e
    })?;
    Session::start(setup, challenge, now())
        .map_err(|e| ClientError::fetch(format!("Failed to fetch word: {}", e)))
}

/// Submits a record, converting any failure into a warning.
///
/// No retry: a failed submission loses the record.
#[instrument(skip(sink, record), fields(nickname = %record.nickname(), score = record.score()))]
pub async fn finish_session(sink: &dyn ScoreSink, record: &ScoreRecord) -> FinishOutcome {
    match sink.submit_score(record).await {
        Ok(()) => {
            info!("Score saved");
            FinishOutcome::Saved
        }
        Err(e) => {
            warn!(error = %e, "Failed to save score");
            FinishOutcome::NotSaved(format!("Failed to save score: {}", e.message))
        }
    }
}

/// A running session together with its tick.
#[derive(Debug, Getters)]
pub struct ActiveSession {
    id: u64,
    session: Session,
    #[getter(skip)]
    tick: TickHandle,
}

impl ActiveSession {
    /// Acquires a challenge and starts ticking.
    #[instrument(skip(source, events))]
    pub async fn begin(
        source: &dyn WordSource,
        setup: SessionSetup,
        tick_period: Duration,
        events: UnboundedSender<TickEvent>,
    ) -> Result<Self, ClientError> {
        let session = start_session(source, setup).await?;
        let id = next_session_id();
        let tick = TickHandle::start(id, tick_period, events);
        info!(session_id = id, "Session active");
        Ok(Self { id, session, tick })
    }

    /// Applies a tick if it belongs to this session. Returns true if applied.
    pub fn on_tick(&mut self, event: TickEvent) -> bool {
        if event.session_id != self.id {
            debug!(expected = self.id, got = event.session_id, "Ignoring foreign tick");
            return false;
        }
        self.session.tick(now());
        true
    }

    /// Submits a guess. Winning stops the tick.
    #[instrument(skip(self), fields(session_id = self.id))]
    pub fn guess(&mut self, input: &str) -> Result<GuessOutcome, SessionError> {
        let outcome = self.session.submit_guess(input, now())?;
        if outcome == GuessOutcome::Solved {
            self.tick.stop();
        }
        Ok(outcome)
    }

    /// Shows the hint.
    pub fn hint(&mut self) -> Result<&str, SessionError> {
        self.session.use_hint()
    }

    /// Returns true while the tick task is alive.
    pub fn is_ticking(&self) -> bool {
        self.tick.is_running()
    }

    /// Stops the tick without finishing, as when the player leaves the game.
    pub fn end(&mut self) {
        self.tick.stop();
    }

    /// After the grace period, emits the session's record to `sink`.
    ///
    /// Returns `None` unless the session is won and its record not yet taken.
    #[instrument(skip(self, sink), fields(session_id = self.id))]
    pub async fn finish(&mut self, sink: &dyn ScoreSink, grace: Duration) -> Option<FinishOutcome> {
        if !self.session.status().is_won() {
            return None;
        }
        self.tick.stop();
        if !grace.is_zero() {
            tokio::time::sleep(grace).await;
        }
        let record = self.session.take_score_record()?;
        Some(finish_session(sink, &record).await)
    }
}
