//! Home screen: nickname entry and category selection.

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::{debug, info, instrument, warn};
use wordgame_core::SessionSetup;

use crate::input::TextInput;
use crate::routes::Route;
use crate::shell::screen::{AppContext, Screen, ScreenTransition};
use crate::shell::widgets::{Banner, Notice};

const LOAD_FAILED: &str = "Failed to load categories. Is the server running?";
const START_INCOMPLETE: &str = "Please enter a nickname and select a category.";

/// Which control receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HomeFocus {
    Nickname,
    Categories,
}

/// State for the home screen.
#[derive(Debug, Getters)]
pub struct HomeScreen {
    nickname: TextInput,
    categories: Vec<String>,
    selected: Option<usize>,
    #[getter(skip)]
    focus: HomeFocus,
}

impl HomeScreen {
    /// Creates the screen with a preset nickname and category list.
    pub fn new(nickname: impl Into<String>, categories: Vec<String>) -> Self {
        Self {
            nickname: TextInput::with_value(nickname),
            categories,
            selected: None,
            focus: HomeFocus::Nickname,
        }
    }

    /// Opens the screen and loads categories from the word source.
    ///
    /// A load failure leaves the list empty and shows the failure on `banner`.
    #[instrument(skip(ctx, banner))]
    pub async fn load(ctx: &AppContext, banner: &mut Banner, nickname: &str) -> Self {
        let mut screen = Self::new(nickname, Vec::new());
        screen.reload(ctx, banner).await;
        screen
    }

    async fn reload(&mut self, ctx: &AppContext, banner: &mut Banner) {
        match ctx.words.categories().await {
            Ok(categories) => {
                info!(count = categories.len(), "Categories loaded");
                self.categories = categories;
                self.selected = self.selected.filter(|i| *i < self.categories.len());
            }
            Err(e) => {
                warn!(error = %e, "Failed to load categories");
                banner.show(Notice::error(LOAD_FAILED));
            }
        }
    }

    /// The chosen category, if any.
    pub fn selected_category(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.categories.get(i))
            .map(String::as_str)
    }

    /// Validates the form into a session setup.
    pub fn setup(&self) -> Option<SessionSetup> {
        let category = self.selected_category()?;
        SessionSetup::new(self.nickname.value(), category).ok()
    }

    fn select_next(&mut self) {
        if self.categories.is_empty() {
            return;
        }
        let next = match self.selected {
            Some(i) if i + 1 < self.categories.len() => i + 1,
            _ => 0,
        };
        self.selected = Some(next);
    }

    fn select_previous(&mut self) {
        if self.categories.is_empty() {
            return;
        }
        let last = self.categories.len() - 1;
        let previous = match self.selected {
            Some(i) if i > 0 => i - 1,
            _ => last,
        };
        self.selected = Some(previous);
    }

    fn field_style(&self, focus: HomeFocus) -> Style {
        if self.focus == focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    }
}

#[async_trait]
impl Screen for HomeScreen {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Welcome to the Word Game!")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let nickname = Paragraph::new(self.nickname.value()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.field_style(HomeFocus::Nickname))
                .title("Nickname"),
        );
        frame.render_widget(nickname, chunks[1]);

        let items: Vec<ListItem> = self
            .categories
            .iter()
            .map(|c| ListItem::new(c.as_str()))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.field_style(HomeFocus::Categories))
                    .title("Category"),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut list_state = ListState::default().with_selected(self.selected);
        frame.render_stateful_widget(list, chunks[2], &mut list_state);

        let start_style = if self.setup().is_some() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let help = Paragraph::new("Tab: Switch field | ↑↓: Category | r: Reload | Enter: Start Game")
            .style(start_style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, ctx, banner))]
    async fn handle_key(
        &mut self,
        key: KeyEvent,
        ctx: &AppContext,
        banner: &mut Banner,
    ) -> ScreenTransition {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    HomeFocus::Nickname => HomeFocus::Categories,
                    HomeFocus::Categories => HomeFocus::Nickname,
                };
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.select_next();
                ScreenTransition::Stay
            }
            KeyCode::Up => {
                self.select_previous();
                ScreenTransition::Stay
            }
            KeyCode::Enter => match self.setup() {
                Some(setup) => {
                    info!(nickname = %setup.nickname(), category = %setup.category(), "Starting game");
                    ScreenTransition::to(Route::Game(setup))
                }
                None => {
                    debug!("Start requested with incomplete form");
                    banner.show(Notice::error(START_INCOMPLETE));
                    ScreenTransition::Stay
                }
            },
            KeyCode::Char('r') if self.focus == HomeFocus::Categories => {
                self.reload(ctx, banner).await;
                ScreenTransition::Stay
            }
            _ => {
                if self.focus == HomeFocus::Nickname {
                    self.nickname.handle_key(key);
                }
                ScreenTransition::Stay
            }
        }
    }
}
