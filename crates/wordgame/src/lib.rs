//! Word game client - terminal front end for the word-guessing REST backend
//!
//! The pure session engine lives in [`wordgame_core`]. This crate connects it
//! to the backend and to the terminal.
//!
//! # Architecture
//!
//! - **api**: [`WordSource`] and [`ScoreSink`] collaborator traits, implemented
//!   over HTTP by [`RestClient`]
//! - **flow**: challenge acquisition, ticking, and score submission around a
//!   [`wordgame_core::Session`]
//! - **admin**: word catalog validation and the delete-then-insert update saga
//! - **shell**: the screen state machine driving the terminal UI
//!
//! # Example
//!
//! ```no_run
//! use wordgame::{ClientConfig, RestClient, WordSource};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ClientConfig::default();
//! let client = RestClient::new(config.server_url(), config.request_timeout())?;
//! let categories = client.categories().await?;
//! println!("{}", categories.join(", "));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod admin;
mod api;
mod config;
mod error;
mod flow;
mod input;
mod routes;
mod shell;
mod tick;

use std::io;
use std::sync::Arc;

use crossterm::{
    cursor::Show,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, instrument};

// Crate-level exports - Backend collaborators
pub use api::{RestClient, ScoreSink, WordSource};

// Crate-level exports - Administration
pub use admin::{UpdateError, add_word, delete_word, is_validation, list_words, prepare, update_word};

// Crate-level exports - Configuration and errors
pub use config::{ClientConfig, ConfigError, SERVER_URL_ENV};
pub use error::{ClientError, ClientErrorKind};

// Crate-level exports - Session flow
pub use flow::{ActiveSession, FinishOutcome, finish_session, now, start_session};
pub use tick::{TickEvent, TickHandle, next_session_id};

// Crate-level exports - Terminal shell
pub use input::TextInput;
pub use routes::Route;
pub use shell::{
    AboutScreen, ActiveScreen, AppContext, AppController, Banner, GameScreen, HomeScreen,
    LEADERBOARD_HEADER, LeaderboardScreen, ManageWordsScreen, Notice, NoticeLevel, Screen,
    ScreenTransition, leaderboard_cells,
};

/// Runs the terminal UI against the configured backend, opening at `route`.
///
/// `route` is a path such as `/leaderboard` or `/game?nickname=ann&category=fruit`.
/// A route that cannot be opened falls back to home.
///
/// Tracing goes to the configured log file so it never draws over the
/// interface. The terminal is restored on every exit path once raw mode is on.
#[instrument(skip(config), fields(server_url = %config.server_url()))]
pub async fn run_tui(config: ClientConfig, route: &str) -> anyhow::Result<()> {
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,wordgame=debug")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(route = %route, "Starting word game TUI");
    let route = Route::resolve(route);

    let client = Arc::new(RestClient::new(
        config.server_url(),
        config.request_timeout(),
    )?);
    let mut controller = AppController::new(client.clone(), client, config);

    enable_raw_mode()?;
    let res = run_in_terminal(&mut controller, route).await;
    let restored = restore_terminal(&mut io::stdout());

    if let Err(err) = &res {
        error!(error = ?err, "Event loop error");
    }
    res?;
    restored?;
    Ok(())
}

/// Enters the alternate screen and runs the controller. Raw mode is already on.
async fn run_in_terminal(controller: &mut AppController, route: Route) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    controller.run(&mut terminal, route).await
}

/// Leaves raw mode and the alternate screen and shows the cursor.
///
/// Safe to call when the terminal was only partly set up.
#[doc(hidden)]
pub fn restore_terminal<W: io::Write>(out: &mut W) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(out, LeaveAlternateScreen, Show)?;
    Ok(())
}
