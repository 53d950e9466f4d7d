//! Client error types.

use derive_more::{Display, Error};
use tracing::instrument;
use wordgame_core::{MissingParameter, ValidationError};

/// Category of a client failure, which decides how the shell reacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ClientErrorKind {
    /// Network or HTTP failure on a backend call, including timeouts and
    /// undecodable bodies.
    #[display("fetch failure")]
    Fetch,
    /// Rejected input: empty field or non-letter category/word.
    #[display("validation failure")]
    Validation,
    /// A session was requested without nickname or category.
    #[display("missing parameter")]
    MissingParameter,
}

/// Client error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{}: {} at {}:{}", kind, message, file, line)]
pub struct ClientError {
    /// What kind of failure this is.
    #[error(not(source))]
    pub kind: ClientErrorKind,
    /// Message suitable for the banner.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ClientError {
    /// Creates a new client error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: ClientErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for a [`ClientErrorKind::Fetch`] error.
    #[track_caller]
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Fetch, message)
    }

    /// Returns true if this error is a fetch failure.
    pub fn is_fetch(&self) -> bool {
        self.kind == ClientErrorKind::Fetch
    }
}

impl From<reqwest::Error> for ClientError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("Request timed out: {}", err)
        } else {
            err.to_string()
        };
        Self::new(ClientErrorKind::Fetch, message)
    }
}

impl From<ValidationError> for ClientError {
    #[track_caller]
    fn from(err: ValidationError) -> Self {
        Self::new(ClientErrorKind::Validation, err.to_string())
    }
}

impl From<MissingParameter> for ClientError {
    #[track_caller]
    fn from(err: MissingParameter) -> Self {
        Self::new(ClientErrorKind::MissingParameter, err.to_string())
    }
}
