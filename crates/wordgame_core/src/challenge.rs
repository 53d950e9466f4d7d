//! Challenge and session setup types.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The secret word and its hint for one session.
///
/// The word is normalized to lowercase on construction and never changes
/// afterwards. Extra fields sent by the server (such as `category`) are ignored
/// during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(from = "ChallengeWire")]
pub struct WordChallenge {
    word: String,
    hint: String,
}

#[derive(Deserialize)]
struct ChallengeWire {
    word: String,
    #[serde(default)]
    hint: String,
}

impl From<ChallengeWire> for WordChallenge {
    fn from(wire: ChallengeWire) -> Self {
        Self::new(wire.word, wire.hint)
    }
}

impl WordChallenge {
    /// Creates a challenge, lowercasing the word.
    #[instrument(skip(word, hint))]
    pub fn new(word: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            word: word.into().to_lowercase(),
            hint: hint.into(),
        }
    }

    /// Number of character positions in the word.
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    /// Returns true if the word has no characters.
    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

/// Which session parameter was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SessionParameter {
    /// The player's nickname.
    #[display("nickname")]
    Nickname,
    /// The word category.
    #[display("category")]
    Category,
}

/// A session was requested without one of its required parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("missing session parameter: {}", parameter)]
pub struct MissingParameter {
    /// The parameter that was absent or empty.
    #[error(not(source))]
    pub parameter: SessionParameter,
}

/// Validated parameters that start a session: who is playing and which category.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SessionSetup {
    nickname: String,
    category: String,
}

impl SessionSetup {
    /// Creates a setup, rejecting an empty nickname or category.
    #[instrument(skip(nickname, category))]
    pub fn new(
        nickname: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, MissingParameter> {
        let nickname = nickname.into();
        let category = category.into();
        if nickname.is_empty() {
            return Err(MissingParameter {
                parameter: SessionParameter::Nickname,
            });
        }
        if category.is_empty() {
            return Err(MissingParameter {
                parameter: SessionParameter::Category,
            });
        }
        Ok(Self { nickname, category })
    }
}
