//! Word Game - Unified CLI
//!
//! Terminal UI by default, plus one-shot commands for categories, the
//! leaderboard, and word catalog administration.

#![warn(missing_docs)]

mod cli;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, EntryArgs, WordsCommand};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use wordgame::{
    ClientConfig, LEADERBOARD_HEADER, RestClient, ScoreSink, WordSource, leaderboard_cells,
};
use wordgame_core::WordEntry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = ClientConfig::load_or_default(&cli.config)?.with_env_overrides();
    if let Some(url) = cli.server_url {
        config = config.with_server_url(url);
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_request_timeout(Some(Duration::from_secs(secs)));
    }

    let command = cli.command.unwrap_or_else(|| Command::Tui {
        route: "/".to_string(),
    });
    run_command(command, config, cli.json).await
}

/// Logs one-shot commands to stderr so stdout carries only results.
fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Sets up stderr logging and a client for a one-shot command.
fn one_shot_client(config: &ClientConfig) -> Result<RestClient> {
    init_stderr_logging();
    Ok(RestClient::new(config.server_url(), config.request_timeout())?)
}

/// Dispatches a command. Everything but the terminal UI runs once and exits.
#[instrument(skip(config), fields(server_url = %config.server_url()))]
async fn run_command(command: Command, config: ClientConfig, json: bool) -> Result<()> {
    match command {
        Command::Tui { route } => wordgame::run_tui(config, &route).await?,
        Command::Categories => {
            let client = one_shot_client(&config)?;
            let categories = client.categories().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                for category in categories {
                    println!("{}", category);
                }
            }
        }
        Command::Leaderboard => {
            let client = one_shot_client(&config)?;
            let entries = client.leaderboard().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("No scores yet.");
            } else {
                let rows = entries
                    .iter()
                    .enumerate()
                    .map(|(i, entry)| leaderboard_cells(i + 1, entry).to_vec())
                    .collect();
                print_table(&LEADERBOARD_HEADER, rows);
            }
        }
        Command::Words { action } => {
            let client = one_shot_client(&config)?;
            run_words(action, &client, json).await?
        }
    }
    Ok(())
}

#[instrument(skip(client))]
async fn run_words(action: WordsCommand, client: &RestClient, json: bool) -> Result<()> {
    match action {
        WordsCommand::List => {
            let words = wordgame::list_words(client).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&words)?);
            } else {
                let rows = words
                    .iter()
                    .enumerate()
                    .map(|(i, w)| {
                        vec![
                            (i + 1).to_string(),
                            w.category().clone(),
                            w.word().clone(),
                            w.hint().clone(),
                        ]
                    })
                    .collect();
                print_table(&["#", "Category", "Word", "Hint"], rows);
            }
        }
        WordsCommand::Add(args) => {
            let stored = wordgame::add_word(client, &entry(args)).await?;
            println!("Added {}/{}", stored.category(), stored.word());
        }
        WordsCommand::Delete(args) => {
            let entry = entry(args);
            wordgame::delete_word(client, &entry).await?;
            println!("Deleted {}/{}", entry.category(), entry.word());
        }
        WordsCommand::Update {
            original,
            to_category,
            to_word,
            to_hint,
        } => {
            let replacement = WordEntry::new(
                to_category.unwrap_or_else(|| original.category.clone()),
                to_word.unwrap_or_else(|| original.word.clone()),
                to_hint.unwrap_or_else(|| original.hint.clone()),
            );
            let original = entry(original);
            let stored = wordgame::update_word(client, &original, &replacement).await?;
            info!(word = %stored.word(), "Update complete");
            println!(
                "Updated {}/{} -> {}/{}",
                original.category(),
                original.word(),
                stored.category(),
                stored.word()
            );
        }
    }
    Ok(())
}

fn entry(args: EntryArgs) -> WordEntry {
    WordEntry::new(args.category, args.word, args.hint)
}

/// Prints left-aligned columns padded to the widest cell.
fn print_table(header: &[&str], rows: Vec<Vec<String>>) {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!("{}", line(header.to_vec()));
    for row in &rows {
        println!("{}", line(row.iter().map(String::as_str).collect()));
    }
}
