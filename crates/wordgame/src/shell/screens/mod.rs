//! Screen implementations for the shell state machine.

mod about;
mod game;
mod home;
mod leaderboard;
mod manage_words;

pub use about::AboutScreen;
pub use game::GameScreen;
pub use home::HomeScreen;
pub use leaderboard::LeaderboardScreen;
pub use manage_words::ManageWordsScreen;
