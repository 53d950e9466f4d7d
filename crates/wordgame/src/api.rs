//! Typed HTTP client for the word and score REST API.
//!
//! The backend is an external collaborator. Its two roles are expressed as
//! traits so the session flow and the administration saga can be driven by
//! in-memory fakes under test:
//!
//! - [`WordSource`]: categories, random challenge, word catalog CRUD
//! - [`ScoreSink`]: score submission and the leaderboard

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};
use wordgame_core::{LeaderboardEntry, ScoreRecord, WordChallenge, WordEntry};

use crate::error::ClientError;

/// Source of challenges and owner of the word catalog.
#[async_trait]
pub trait WordSource: Send + Sync {
    /// Lists all categories that contain at least one word.
    async fn categories(&self) -> Result<Vec<String>, ClientError>;

    /// Fetches one random challenge from `category`.
    async fn random_word(&self, category: &str) -> Result<WordChallenge, ClientError>;

    /// Lists every entry in the catalog.
    async fn list_words(&self) -> Result<Vec<WordEntry>, ClientError>;

    /// Adds an entry. A rejection carries the server's error text.
    async fn add_word(&self, entry: &WordEntry) -> Result<(), ClientError>;

    /// Deletes the entry that matches `entry` by full value.
    async fn delete_word(&self, entry: &WordEntry) -> Result<(), ClientError>;
}

/// Destination for completed-session results.
#[async_trait]
pub trait ScoreSink: Send + Sync {
    /// Submits one completed-session record. Only the status is inspected.
    async fn submit_score(&self, record: &ScoreRecord) -> Result<(), ClientError>;

    /// Fetches the ranked leaderboard in server order.
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ClientError>;
}

/// REST client for the game backend.
#[derive(Debug, Clone)]
pub struct RestClient {
    base_url: String,
    client: reqwest::Client,
}

impl RestClient {
    /// Creates a client for `base_url`, optionally bounding every request.
    #[instrument(skip(base_url), fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            debug!(?timeout, "Bounding requests");
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fails with the response body as message if the status is not 2xx.
    async fn ensure_success(response: Response, fallback: &str) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(status = %status, error = %e, "Failed to read error body");
                String::new()
            }
        };
        debug!(status = %status, body = %body, "Non-success response");
        let message = if body.trim().is_empty() {
            format!("{} (HTTP {})", fallback, status)
        } else {
            body
        };
        Err(ClientError::fetch(message))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: impl reqwest::IntoUrl, what: &str) -> Result<T, ClientError> {
        let response = self.client.get(url).send().await?;
        let response = Self::ensure_success(response, what).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::fetch(format!("{}: invalid response body: {}", what, e)))
    }
}

#[async_trait]
impl WordSource for RestClient {
    #[instrument(skip(self))]
    async fn categories(&self) -> Result<Vec<String>, ClientError> {
        debug!("Fetching categories");
        let categories: Vec<String> = self
            .get_json(self.url("/api/words/categories"), "Failed to load categories")
            .await?;
        info!(count = categories.len(), "Categories loaded");
        Ok(categories)
    }

    #[instrument(skip(self))]
    async fn random_word(&self, category: &str) -> Result<WordChallenge, ClientError> {
        let url = Url::parse_with_params(&self.url("/api/words/random"), [("category", category)])
            .map_err(|e| ClientError::fetch(format!("Invalid server URL: {}", e)))?;
        debug!(url = %url, "Fetching random word");
        let challenge: WordChallenge = self.get_json(url, "Failed to fetch word").await?;
        if challenge.is_empty() {
            warn!("Server returned an empty word");
            return Err(ClientError::fetch("Failed to fetch word: server returned an empty word"));
        }
        info!(length = challenge.len(), "Challenge received");
        Ok(challenge)
    }

    #[instrument(skip(self))]
    async fn list_words(&self) -> Result<Vec<WordEntry>, ClientError> {
        let words: Vec<WordEntry> = self
            .get_json(self.url("/api/words"), "Failed to fetch words.")
            .await?;
        info!(count = words.len(), "Word list loaded");
        Ok(words)
    }

    #[instrument(skip(self), fields(category = %entry.category(), word = %entry.word()))]
    async fn add_word(&self, entry: &WordEntry) -> Result<(), ClientError> {
        info!("Adding word");
        let response = self.client.post(self.url("/api/words")).json(entry).send().await?;
        Self::ensure_success(response, "Failed to add word.").await?;
        Ok(())
    }

    #[instrument(skip(self), fields(category = %entry.category(), word = %entry.word()))]
    async fn delete_word(&self, entry: &WordEntry) -> Result<(), ClientError> {
        info!("Deleting word");
        let response = self
            .client
            .delete(self.url("/api/words"))
            .json(entry)
            .send()
            .await?;
        Self::ensure_success(response, "Failed to delete word.").await?;
        Ok(())
    }
}

#[async_trait]
impl ScoreSink for RestClient {
    #[instrument(skip(self), fields(nickname = %record.nickname(), score = record.score()))]
    async fn submit_score(&self, record: &ScoreRecord) -> Result<(), ClientError> {
        info!("Submitting score");
        let response = self.client.post(self.url("/api/scores")).json(record).send().await?;
        Self::ensure_success(response, "Failed to save score").await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ClientError> {
        let entries: Vec<LeaderboardEntry> = self
            .get_json(self.url("/api/scores"), "Failed to load scores")
            .await?;
        info!(count = entries.len(), "Leaderboard loaded");
        Ok(entries)
    }
}
