//! Game screen: one active session with its tick.

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, info, instrument};
use wordgame_core::{GuessOutcome, SessionError, SessionSetup};

use crate::error::ClientError;
use crate::flow::{ActiveSession, FinishOutcome};
use crate::input::TextInput;
use crate::routes::Route;
use crate::shell::screen::{AppContext, Screen, ScreenTransition};
use crate::shell::widgets::{Banner, Notice};
use crate::tick::TickEvent;

/// State for the game screen.
#[derive(Debug)]
pub struct GameScreen {
    active: ActiveSession,
    guess: TextInput,
}

impl GameScreen {
    /// Acquires a challenge and starts the session and its tick.
    ///
    /// On failure no screen exists and the caller returns to setup.
    #[instrument(skip(ctx))]
    pub async fn start(ctx: &AppContext, setup: SessionSetup) -> Result<Self, ClientError> {
        let active = ActiveSession::begin(
            ctx.words.as_ref(),
            setup,
            ctx.config.tick_interval(),
            ctx.ticks.clone(),
        )
        .await?;
        Ok(Self {
            active,
            guess: TextInput::default(),
        })
    }

    /// The running session.
    pub fn active(&self) -> &ActiveSession {
        &self.active
    }

    fn submit(&mut self) {
        let input = self.guess.take();
        match self.active.guess(&input) {
            Ok(GuessOutcome::Solved) => info!("Word solved"),
            Ok(outcome) => debug!(?outcome, "Guess applied"),
            Err(SessionError::EmptyGuess) => {}
            Err(e) => debug!(error = %e, "Guess ignored"),
        }
    }
}

#[async_trait]
impl Screen for GameScreen {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let session = self.active.session();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(5),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Min(0),
            ])
            .split(area);

        let header = Paragraph::new(vec![
            Line::from(format!("Hello, {}!", session.setup().nickname())),
            Line::from(format!("Category: {}", session.setup().category())),
        ])
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        let word_style = if session.status().is_won() {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let word = Paragraph::new(vec![Line::from(""), Line::from(session.revealed_display())])
            .style(word_style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Word"));
        frame.render_widget(word, chunks[1]);

        let guess = Paragraph::new(self.guess.value()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title("Enter letter or word"),
        );
        frame.render_widget(guess, chunks[2]);

        let hint_text = match session.shown_hint() {
            Some(hint) => format!("Hint used: {}", hint),
            None => "Tab: Show Hint".to_string(),
        };
        let hint = Paragraph::new(hint_text)
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(hint, chunks[3]);

        let counters = Paragraph::new(vec![
            Line::from(format!("Time: {} sec", session.elapsed_secs())),
            Line::from(format!("Attempts: {}", session.attempts())),
        ])
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(counters, chunks[4]);

        let help = Paragraph::new("Enter: Guess | Tab: Hint | Esc: Leave game")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(help, chunks[5]);
    }

    #[instrument(skip(self, key, _ctx, banner), fields(session_id = self.active.id()))]
    async fn handle_key(
        &mut self,
        key: KeyEvent,
        _ctx: &AppContext,
        banner: &mut Banner,
    ) -> ScreenTransition {
        match key.code {
            KeyCode::Enter => {
                self.submit();
                ScreenTransition::Stay
            }
            KeyCode::Tab => {
                if let Ok(hint) = self.active.hint() {
                    banner.show(Notice::info(format!("Hint: {}", hint)));
                }
                ScreenTransition::Stay
            }
            KeyCode::Esc => {
                info!("Leaving game");
                self.active.end();
                ScreenTransition::to(Route::Home)
            }
            _ => {
                self.guess.handle_key(key);
                ScreenTransition::Stay
            }
        }
    }

    fn on_tick(&mut self, event: TickEvent) {
        self.active.on_tick(event);
    }

    async fn settle(&mut self, ctx: &AppContext, _banner: &mut Banner) -> ScreenTransition {
        match self
            .active
            .finish(ctx.scores.as_ref(), ctx.config.win_delay())
            .await
        {
            Some(FinishOutcome::Saved) => ScreenTransition::to(Route::Leaderboard),
            Some(FinishOutcome::NotSaved(warning)) => {
                ScreenTransition::to_with(Route::Leaderboard, Notice::warning(warning))
            }
            None => ScreenTransition::Stay,
        }
    }

    fn leave(&mut self) {
        self.active.end();
    }
}
