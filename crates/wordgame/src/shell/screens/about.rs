//! About screen.

use async_trait::async_trait;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::shell::screen::{AppContext, Screen, ScreenTransition};
use crate::shell::widgets::Banner;

const DESCRIPTION: [&str; 6] = [
    "A terminal client for a word-guessing game played against a REST backend.",
    "",
    "Pick a nickname and a category, then guess the hidden word one letter at a",
    "time or all at once. Every guess costs 10 points, the hint costs 100, and",
    "each second on the clock costs one more. Finished games go to the leaderboard.",
    "",
];

/// Static project description.
#[derive(Debug, Default)]
pub struct AboutScreen;

#[async_trait]
impl Screen for AboutScreen {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![Line::styled(
            "About the Project",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];
        lines.push(Line::from(""));
        lines.extend(DESCRIPTION.iter().map(|l| Line::from(*l)));
        lines.push(Line::from(format!(
            "{} {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        )));

        let about = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(about, area);
    }

    async fn handle_key(
        &mut self,
        _key: KeyEvent,
        _ctx: &AppContext,
        _banner: &mut Banner,
    ) -> ScreenTransition {
        ScreenTransition::Stay
    }
}
