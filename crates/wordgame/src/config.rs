//! Client configuration loaded from TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Environment variable that overrides the configured server URL.
pub const SERVER_URL_ENV: &str = "WORDGAME_SERVER_URL";

/// Configuration for the game client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend, without trailing slash.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// Optional bound on every backend request. Unbounded when absent.
    #[serde(default)]
    request_timeout_secs: Option<u64>,

    /// Grace period between the winning guess and finalizing the session.
    #[serde(default = "default_win_delay_ms")]
    win_delay_ms: u64,

    /// Interval of the elapsed-time tick.
    #[serde(default = "default_tick_interval_ms")]
    tick_interval_ms: u64,

    /// File that receives tracing output while the terminal UI runs.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

#[instrument]
fn default_server_url() -> String {
    "http://localhost:8080".to_string()
}

#[instrument]
fn default_win_delay_ms() -> u64 {
    300
}

#[instrument]
fn default_tick_interval_ms() -> u64 {
    1000
}

#[instrument]
fn default_log_file() -> PathBuf {
    PathBuf::from("wordgame_tui.log")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            request_timeout_secs: None,
            win_delay_ms: default_win_delay_ms(),
            tick_interval_ms: default_tick_interval_ms(),
            log_file: default_log_file(),
        }
    }
}

impl ClientConfig {
    /// Creates a default configuration pointing at `server_url`.
    #[instrument(skip(server_url))]
    pub fn for_server(server_url: impl Into<String>) -> Self {
        Self::default().with_server_url(server_url)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(server_url = %config.server_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies the `WORDGAME_SERVER_URL` environment override, if set.
    #[instrument(skip(self))]
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(SERVER_URL_ENV) {
            Ok(url) if !url.is_empty() => {
                debug!(url = %url, "Server URL overridden from environment");
                self.with_server_url(url)
            }
            _ => self,
        }
    }

    /// Replaces the server URL, stripping any trailing slash.
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout, rounded down to whole seconds with a minimum of one.
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout_secs = timeout.map(|t| t.as_secs().max(1));
        self
    }

    /// Sets the win grace period in milliseconds.
    pub fn with_win_delay_ms(mut self, ms: u64) -> Self {
        self.win_delay_ms = ms;
        self
    }

    /// Request timeout as a [`Duration`], if configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Win grace period as a [`Duration`].
    pub fn win_delay(&self) -> Duration {
        Duration::from_millis(self.win_delay_ms)
    }

    /// Tick interval as a [`Duration`], never shorter than one millisecond.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
