//! Terminal shell: screen state machine, shared chrome, and the five views.

mod controller;
mod screen;
mod screens;
mod widgets;

pub use controller::{ActiveScreen, AppController};
pub use screen::{AppContext, Screen, ScreenTransition};
pub use screens::{AboutScreen, GameScreen, HomeScreen, LeaderboardScreen, ManageWordsScreen};
pub use widgets::{Banner, LEADERBOARD_HEADER, Notice, NoticeLevel, leaderboard_cells};
