//! Shared chrome: navigation bar, message banner, loading placeholder.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use wordgame_core::LeaderboardEntry;

use crate::routes::Route;

/// Severity of a banner message, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum::Display)]
pub enum NoticeLevel {
    /// Neutral information such as the hint.
    Info,
    /// Something went wrong but the flow continues.
    Warning,
    /// The requested action failed.
    Error,
}

impl NoticeLevel {
    fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

/// A message for the banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Text shown to the player.
    pub text: String,
}

impl Notice {
    /// Informational notice.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    /// Warning notice.
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    /// Error notice.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Dismissible message area shown above every screen body.
#[derive(Debug, Clone, Default)]
pub struct Banner {
    notice: Option<Notice>,
}

impl Banner {
    /// Shows `notice`, replacing any current message.
    pub fn show(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// Shows `notice` ahead of the current message, keeping both.
    ///
    /// The combined message takes the more severe level.
    pub fn prepend(&mut self, notice: Notice) {
        let merged = match self.notice.take() {
            Some(existing) => Notice {
                level: notice.level.max(existing.level),
                text: format!("{} | {}", notice.text, existing.text),
            },
            None => notice,
        };
        self.notice = Some(merged);
    }

    /// Hides the banner.
    pub fn dismiss(&mut self) {
        self.notice = None;
    }

    /// Returns true while a message is shown.
    pub fn is_visible(&self) -> bool {
        self.notice.is_some()
    }

    /// The current message, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Height the banner needs, zero when hidden.
    pub fn height(&self) -> u16 {
        if self.is_visible() { 3 } else { 0 }
    }

    /// Renders the banner into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(notice) = &self.notice else {
            return;
        };
        let paragraph = Paragraph::new(notice.text.as_str())
            .style(Style::default().fg(notice.level.color()))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{} (Esc to dismiss)", notice.level)),
            );
        frame.render_widget(paragraph, area);
    }
}

const NAV_ITEMS: [(&str, &str); 4] = [
    ("F1", "Home"),
    ("F2", "Leaderboard"),
    ("F3", "Manage Words"),
    ("F4", "About"),
];

/// Renders the navigation bar with the active view highlighted.
pub fn render_navbar(frame: &mut Frame, area: Rect, active: &Route) {
    let mut spans = vec![Span::styled(
        "Word Game  ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    for (key, title) in NAV_ITEMS {
        let style = if title == active.title() {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {}: {} ", key, title), style));
    }
    spans.push(Span::styled(
        "  Ctrl+C: Quit",
        Style::default().fg(Color::DarkGray),
    ));
    let bar = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(bar, area);
}

/// Renders a loading placeholder while a view fetches its data.
pub fn render_loading(frame: &mut Frame, area: Rect, route: &Route) {
    let text = match route {
        Route::Game(_) => "Loading word...".to_string(),
        other => format!("Loading {}...", other.title()),
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// Table cells for one entry at 1-based `rank`.
pub fn leaderboard_cells(rank: usize, entry: &LeaderboardEntry) -> [String; 6] {
    [
        rank.to_string(),
        entry.nickname().clone(),
        entry.score().to_string(),
        entry.time().to_string(),
        entry.attempts().to_string(),
        if *entry.used_hint() { "Yes" } else { "No" }.to_string(),
    ]
}

/// Column titles of the leaderboard table.
pub const LEADERBOARD_HEADER: [&str; 6] =
    ["#", "Nickname", "Score", "Time (s)", "Attempts", "Hint Used"];
