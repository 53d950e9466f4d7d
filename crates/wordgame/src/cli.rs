//! Command-line interface for wordgame.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Word Game - terminal client for the word-guessing backend
#[derive(Parser, Debug)]
#[command(name = "wordgame")]
#[command(about = "Terminal client for the word-guessing game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file. Defaults apply when it does not exist.
    #[arg(long, global = true, default_value = "wordgame.toml")]
    pub config: PathBuf,

    /// Backend URL, overriding the config file and WORDGAME_SERVER_URL
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    /// Bound every backend request to this many seconds (at least 1)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Print command results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to run. Defaults to the terminal UI.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the terminal UI
    Tui {
        /// Route to open, e.g. `/leaderboard` or `/game?nickname=ann&category=fruit`
        #[arg(long, default_value = "/")]
        route: String,
    },

    /// List word categories
    Categories,

    /// Show the leaderboard
    Leaderboard,

    /// Administer the word catalog
    Words {
        /// Catalog action
        #[command(subcommand)]
        action: WordsCommand,
    },
}

/// Word catalog actions
#[derive(Subcommand, Debug)]
pub enum WordsCommand {
    /// List every entry
    List,

    /// Add an entry
    Add(EntryArgs),

    /// Delete an entry by full value
    Delete(EntryArgs),

    /// Replace an entry (delete, then add)
    Update {
        /// Entry to replace
        #[command(flatten)]
        original: EntryArgs,

        /// New category (defaults to the current one)
        #[arg(long)]
        to_category: Option<String>,

        /// New word (defaults to the current one)
        #[arg(long)]
        to_word: Option<String>,

        /// New hint (defaults to the current one)
        #[arg(long)]
        to_hint: Option<String>,
    },
}

/// A catalog entry given positionally.
#[derive(Args, Debug, Clone)]
pub struct EntryArgs {
    /// Category (letters only)
    pub category: String,
    /// Word (letters only)
    pub word: String,
    /// Hint shown to the player
    pub hint: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = Cli::try_parse_from(["wordgame", "--timeout-secs", "0", "categories"])
            .expect_err("zero timeout");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_timeout_is_accepted() {
        let cli = Cli::try_parse_from(["wordgame", "--timeout-secs", "3", "categories"])
            .expect("valid timeout");
        assert_eq!(cli.timeout_secs, Some(3));
        assert!(matches!(cli.command, Some(Command::Categories)));
    }

    #[test]
    fn test_no_subcommand_runs_tui() {
        let cli = Cli::try_parse_from(["wordgame"]).expect("bare invocation");
        assert!(cli.command.is_none());
    }
}
