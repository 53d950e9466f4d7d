//! Leaderboard screen: ranked scores in server order.

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use tracing::{info, instrument, warn};
use wordgame_core::LeaderboardEntry;

use crate::shell::screen::{AppContext, Screen, ScreenTransition};
use crate::shell::widgets::{Banner, LEADERBOARD_HEADER, Notice, leaderboard_cells};

/// State for the leaderboard screen.
#[derive(Debug, Default, Getters)]
pub struct LeaderboardScreen {
    entries: Vec<LeaderboardEntry>,
}

impl LeaderboardScreen {
    /// Opens the screen and fetches the leaderboard.
    #[instrument(skip(ctx, banner))]
    pub async fn load(ctx: &AppContext, banner: &mut Banner) -> Self {
        let mut screen = Self::default();
        screen.reload(ctx, banner).await;
        screen
    }

    async fn reload(&mut self, ctx: &AppContext, banner: &mut Banner) {
        match ctx.scores.leaderboard().await {
            Ok(entries) => {
                info!(count = entries.len(), "Leaderboard loaded");
                self.entries = entries;
            }
            Err(e) => {
                warn!(error = %e, "Failed to load scores");
                banner.show(Notice::error(format!("Failed to load scores: {}", e.message)));
            }
        }
    }
}

#[async_trait]
impl Screen for LeaderboardScreen {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(1)])
            .split(area);

        if self.entries.is_empty() {
            let empty = Paragraph::new("No scores yet.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Leaderboard"));
            frame.render_widget(empty, chunks[0]);
        } else {
            let header = Row::new(
                LEADERBOARD_HEADER
                    .iter()
                    .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD))),
            )
            .style(Style::default().fg(Color::Yellow));

            let rows: Vec<Row> = self
                .entries
                .iter()
                .enumerate()
                .map(|(i, entry)| Row::new(leaderboard_cells(i + 1, entry)))
                .collect();

            let widths = [
                Constraint::Length(4),
                Constraint::Percentage(30),
                Constraint::Percentage(15),
                Constraint::Percentage(15),
                Constraint::Percentage(15),
                Constraint::Percentage(15),
            ];
            let table = Table::new(rows, widths)
                .header(header)
                .block(Block::default().borders(Borders::ALL).title("Leaderboard"));
            frame.render_widget(table, chunks[0]);
        }

        let help = Paragraph::new("r: Refresh")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(help, chunks[1]);
    }

    #[instrument(skip(self, key, ctx, banner))]
    async fn handle_key(
        &mut self,
        key: KeyEvent,
        ctx: &AppContext,
        banner: &mut Banner,
    ) -> ScreenTransition {
        if let KeyCode::Char('r') | KeyCode::Char('R') = key.code {
            self.reload(ctx, banner).await;
        }
        ScreenTransition::Stay
    }
}
