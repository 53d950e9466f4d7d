//! In-memory collaborators shared by the integration tests.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use wordgame::{ClientError, ScoreSink, WordSource};
use wordgame_core::{LeaderboardEntry, ScoreRecord, WordChallenge, WordEntry};

/// Fake backend with call counters and switchable failures.
#[derive(Debug, Default)]
pub struct FakeBackend {
    pub words: Mutex<Vec<WordEntry>>,
    pub scores: Mutex<Vec<ScoreRecord>>,
    pub calls: AtomicUsize,
    pub fail_random: bool,
    pub fail_add: bool,
    pub fail_delete: bool,
    pub fail_submit: bool,
    pub fail_leaderboard: bool,
}

impl FakeBackend {
    pub fn with_words(words: Vec<WordEntry>) -> Self {
        Self {
            words: Mutex::new(words),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn stored_words(&self) -> Vec<WordEntry> {
        self.words.lock().unwrap().clone()
    }

    pub fn stored_scores(&self) -> Vec<ScoreRecord> {
        self.scores.lock().unwrap().clone()
    }

    fn count(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl WordSource for FakeBackend {
    async fn categories(&self) -> Result<Vec<String>, ClientError> {
        self.count();
        let mut categories: Vec<String> = self
            .words
            .lock()
            .unwrap()
            .iter()
            .map(|w| w.category().clone())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    async fn random_word(&self, category: &str) -> Result<WordChallenge, ClientError> {
        self.count();
        if self.fail_random {
            return Err(ClientError::fetch("Failed to fetch word"));
        }
        self.words
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.category() == category)
            .map(|w| WordChallenge::new(w.word().clone(), w.hint().clone()))
            .ok_or_else(|| ClientError::fetch("Failed to fetch word"))
    }

    async fn list_words(&self) -> Result<Vec<WordEntry>, ClientError> {
        self.count();
        Ok(self.stored_words())
    }

    async fn add_word(&self, entry: &WordEntry) -> Result<(), ClientError> {
        self.count();
        if self.fail_add {
            return Err(ClientError::fetch("Word already exists"));
        }
        self.words.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn delete_word(&self, entry: &WordEntry) -> Result<(), ClientError> {
        self.count();
        if self.fail_delete {
            return Err(ClientError::fetch("Failed to delete word."));
        }
        self.words.lock().unwrap().retain(|w| w != entry);
        Ok(())
    }
}

#[async_trait]
impl ScoreSink for FakeBackend {
    async fn submit_score(&self, record: &ScoreRecord) -> Result<(), ClientError> {
        self.count();
        if self.fail_submit {
            return Err(ClientError::fetch("connection refused"));
        }
        self.scores.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ClientError> {
        self.count();
        if self.fail_leaderboard {
            return Err(ClientError::fetch("connection refused"));
        }
        Ok(self.stored_scores())
    }
}

pub fn entry(category: &str, word: &str, hint: &str) -> WordEntry {
    WordEntry::new(category.to_string(), word.to_string(), hint.to_string())
}
