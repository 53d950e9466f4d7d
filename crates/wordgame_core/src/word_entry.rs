//! Word catalog entries and their validation rules.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One word in the catalog.
///
/// There is no surrogate key: the `(category, word, hint)` triple is the
/// identity, and deletion on the server matches by full value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new)]
pub struct WordEntry {
    category: String,
    word: String,
    hint: String,
}

/// Reason a word entry was rejected before reaching the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ValidationError {
    /// Category, word, or hint is empty.
    #[display("All fields are required.")]
    MissingField,
    /// Category or word contains something other than a-z letters.
    #[display("Category and word must contain only a-z letters.")]
    NonLetter,
}

impl WordEntry {
    /// Returns the entry as it is submitted: category and word lowercased and
    /// trimmed, hint trimmed.
    #[instrument(skip(self))]
    pub fn normalized(&self) -> Self {
        Self {
            category: self.category.trim().to_lowercase(),
            word: self.word.trim().to_lowercase(),
            hint: self.hint.trim().to_string(),
        }
    }

    /// Checks that every field is present and that category and word are
    /// ASCII letters only.
    #[instrument(skip(self), fields(category = %self.category, word = %self.word))]
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.category.is_empty() || self.word.is_empty() || self.hint.is_empty() {
            debug!("Rejecting entry with empty field");
            return Err(ValidationError::MissingField);
        }
        if !is_letters(&self.category) || !is_letters(&self.word) {
            debug!("Rejecting entry with non-letter characters");
            return Err(ValidationError::NonLetter);
        }
        Ok(())
    }
}

fn is_letters(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic())
}
