//! Word catalog administration screen.

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use tracing::{debug, info, instrument, warn};
use wordgame_core::WordEntry;

use crate::admin;
use crate::input::TextInput;
use crate::shell::screen::{AppContext, Screen, ScreenTransition};
use crate::shell::widgets::{Banner, Notice};

/// Control that receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Category,
    Word,
    Hint,
    Table,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Category => Self::Word,
            Self::Word => Self::Hint,
            Self::Hint => Self::Table,
            Self::Table => Self::Category,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Category => Self::Table,
            Self::Word => Self::Category,
            Self::Hint => Self::Word,
            Self::Table => Self::Hint,
        }
    }
}

/// State for the manage-words screen.
///
/// The form doubles as the editor: `editing` holds the original entry while
/// an edit is in progress, and submitting the form then runs the update saga
/// instead of an add.
#[derive(Debug, Getters)]
pub struct ManageWordsScreen {
    words: Vec<WordEntry>,
    selected: Option<usize>,
    editing: Option<WordEntry>,
    #[getter(skip)]
    category: TextInput,
    #[getter(skip)]
    word: TextInput,
    #[getter(skip)]
    hint: TextInput,
    #[getter(skip)]
    focus: Focus,
}

impl ManageWordsScreen {
    /// Creates the screen around an already loaded catalog.
    pub fn new(words: Vec<WordEntry>) -> Self {
        let selected = if words.is_empty() { None } else { Some(0) };
        Self {
            words,
            selected,
            editing: None,
            category: TextInput::default(),
            word: TextInput::default(),
            hint: TextInput::default(),
            focus: Focus::Category,
        }
    }

    /// Opens the screen and loads the catalog.
    #[instrument(skip(ctx, banner))]
    pub async fn load(ctx: &AppContext, banner: &mut Banner) -> Self {
        let mut screen = Self::new(Vec::new());
        screen.reload(ctx, banner).await;
        screen
    }

    async fn reload(&mut self, ctx: &AppContext, banner: &mut Banner) {
        match admin::list_words(ctx.words.as_ref()).await {
            Ok(words) => {
                debug!(count = words.len(), "Catalog loaded");
                self.words = words;
                self.selected = match self.selected {
                    _ if self.words.is_empty() => None,
                    Some(i) => Some(i.min(self.words.len() - 1)),
                    None => Some(0),
                };
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch words");
                banner.show(Notice::error("Failed to fetch words."));
            }
        }
    }

    fn form_entry(&self) -> WordEntry {
        WordEntry::new(
            self.category.value().to_string(),
            self.word.value().to_string(),
            self.hint.value().to_string(),
        )
    }

    fn clear_form(&mut self) {
        self.category.clear();
        self.word.clear();
        self.hint.clear();
    }

    fn selected_entry(&self) -> Option<&WordEntry> {
        self.selected.and_then(|i| self.words.get(i))
    }

    fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            Focus::Category => Some(&mut self.category),
            Focus::Word => Some(&mut self.word),
            Focus::Hint => Some(&mut self.hint),
            Focus::Table => None,
        }
    }

    /// Loads the selected entry into the form for editing.
    #[instrument(skip(self))]
    fn start_edit(&mut self) {
        let Some(entry) = self.selected_entry().cloned() else {
            return;
        };
        debug!(word = %entry.word(), "Editing entry");
        self.category = TextInput::with_value(entry.category().clone());
        self.word = TextInput::with_value(entry.word().clone());
        self.hint = TextInput::with_value(entry.hint().clone());
        self.editing = Some(entry);
        self.focus = Focus::Category;
    }

    fn cancel_edit(&mut self) {
        self.editing = None;
        self.clear_form();
    }

    async fn submit(&mut self, ctx: &AppContext, banner: &mut Banner) {
        let entry = self.form_entry();
        match self.editing.clone() {
            None => match admin::add_word(ctx.words.as_ref(), &entry).await {
                Ok(_) => {
                    self.clear_form();
                    banner.dismiss();
                    self.reload(ctx, banner).await;
                }
                Err(e) => banner.show(Notice::error(e.message)),
            },
            Some(original) => {
                match admin::update_word(ctx.words.as_ref(), &original, &entry).await {
                    Ok(_) => {
                        self.cancel_edit();
                        banner.dismiss();
                        self.reload(ctx, banner).await;
                    }
                    Err(e) => {
                        banner.show(Notice::error(e.to_string()));
                        if e.original_missing() {
                            // The form keeps the replacement so it can be re-added.
                            self.editing = None;
                            self.reload(ctx, banner).await;
                        }
                    }
                }
            }
        }
    }

    async fn delete_selected(&mut self, ctx: &AppContext, banner: &mut Banner) {
        let Some(entry) = self.selected_entry().cloned() else {
            return;
        };
        match admin::delete_word(ctx.words.as_ref(), &entry).await {
            Ok(()) => {
                info!(word = %entry.word(), "Entry removed from catalog");
                if self.editing.as_ref() == Some(&entry) {
                    self.cancel_edit();
                }
                banner.dismiss();
                self.reload(ctx, banner).await;
            }
            Err(e) => banner.show(Notice::error(format!("Failed to delete word: {}", e.message))),
        }
    }

    fn field_block(&self, focus: Focus, title: &'static str) -> Block<'static> {
        let style = if self.focus == focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(title)
    }
}

#[async_trait]
impl Screen for ManageWordsScreen {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        let form = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(50),
            ])
            .split(chunks[0]);
        frame.render_widget(
            Paragraph::new(self.category.value())
                .block(self.field_block(Focus::Category, "Category (a-z only)")),
            form[0],
        );
        frame.render_widget(
            Paragraph::new(self.word.value()).block(self.field_block(Focus::Word, "Word (a-z only)")),
            form[1],
        );
        frame.render_widget(
            Paragraph::new(self.hint.value()).block(self.field_block(Focus::Hint, "Hint")),
            form[2],
        );

        let header = Row::new(
            ["#", "Category", "Word", "Hint"]
                .into_iter()
                .map(|h| Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))),
        )
        .style(Style::default().fg(Color::Yellow));
        let rows: Vec<Row> = self
            .words
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let row = Row::new(vec![
                    Cell::from((i + 1).to_string()),
                    Cell::from(entry.category().as_str()),
                    Cell::from(entry.word().as_str()),
                    Cell::from(entry.hint().as_str()),
                ]);
                if self.editing.as_ref() == Some(entry) {
                    row.style(Style::default().fg(Color::Cyan))
                } else {
                    row
                }
            })
            .collect();
        let widths = [
            Constraint::Length(4),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(55),
        ];
        let title = if self.editing.is_some() {
            "Words (editing)"
        } else {
            "Words"
        };
        let table = Table::new(rows, widths)
            .header(header)
            .block(self.field_block(Focus::Table, title))
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut table_state = TableState::default().with_selected(self.selected);
        frame.render_stateful_widget(table, chunks[1], &mut table_state);

        let help = if self.editing.is_some() {
            "Tab: Next field | Enter: Save | Esc: Cancel edit"
        } else {
            "Tab: Next field | Enter: Add word | Table: ↑↓ select, e: Edit, d: Delete"
        };
        frame.render_widget(
            Paragraph::new(help)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            chunks[2],
        );
    }

    #[instrument(skip(self, key, ctx, banner))]
    async fn handle_key(
        &mut self,
        key: KeyEvent,
        ctx: &AppContext,
        banner: &mut Banner,
    ) -> ScreenTransition {
        match key.code {
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.previous(),
            KeyCode::Esc if self.editing.is_some() => {
                debug!("Edit cancelled");
                self.cancel_edit();
                banner.dismiss();
            }
            KeyCode::Enter if self.focus != Focus::Table => self.submit(ctx, banner).await,
            KeyCode::Up if self.focus == Focus::Table => {
                self.selected = self.selected.map(|i| i.saturating_sub(1));
            }
            KeyCode::Down if self.focus == Focus::Table => {
                self.selected = self
                    .selected
                    .map(|i| (i + 1).min(self.words.len().saturating_sub(1)));
            }
            KeyCode::Char('e') | KeyCode::Enter if self.focus == Focus::Table => self.start_edit(),
            KeyCode::Char('d') if self.focus == Focus::Table => {
                self.delete_selected(ctx, banner).await
            }
            _ => {
                if let Some(input) = self.focused_input() {
                    input.handle_key(key);
                }
            }
        }
        ScreenTransition::Stay
    }
}
