//! Word catalog administration.
//!
//! Every mutating call normalizes and validates its entry first, so a
//! [`ClientErrorKind::Validation`] failure never reaches the network.
//!
//! Updating an entry is a two-step saga against an API with no update
//! endpoint: delete the original, then insert the replacement. The steps are
//! not atomic. [`UpdateError`] says which step failed and whether the original
//! entry is now missing from the catalog.

use derive_more::{Display, Error};
use tracing::{error, info, instrument, warn};
use wordgame_core::WordEntry;

use crate::api::WordSource;
use crate::error::{ClientError, ClientErrorKind};

/// Failure of the delete-then-insert update.
#[derive(Debug, Clone, Display, Error)]
pub enum UpdateError {
    /// The replacement failed validation. Nothing was sent.
    #[display("{}", _0.message)]
    Rejected(ClientError),
    /// Step one failed. The catalog was not changed.
    #[display("Failed to delete original word: {}", _0.message)]
    DeleteFailed(ClientError),
    /// Step two failed after step one succeeded. The original entry is gone
    /// and the replacement was not stored.
    #[display(
        "Original word '{}' was removed but the replacement was not added: {}",
        original.word(),
        error.message
    )]
    InsertFailed {
        /// Error from the insert call.
        error: ClientError,
        /// The entry that is no longer in the catalog.
        #[error(not(source))]
        original: WordEntry,
    },
}

impl UpdateError {
    /// True when the catalog lost the original entry.
    pub fn original_missing(&self) -> bool {
        matches!(self, Self::InsertFailed { .. })
    }
}

/// Normalizes an entry and validates it for submission.
#[instrument(skip(entry))]
pub fn prepare(entry: &WordEntry) -> Result<WordEntry, ClientError> {
    let normalized = entry.normalized();
    normalized.validate()?;
    Ok(normalized)
}

/// Fetches the full catalog.
#[instrument(skip(source))]
pub async fn list_words(source: &dyn WordSource) -> Result<Vec<WordEntry>, ClientError> {
    source.list_words().await
}

/// Validates and adds an entry. Returns the entry as stored.
#[instrument(skip(source, entry))]
pub async fn add_word(source: &dyn WordSource, entry: &WordEntry) -> Result<WordEntry, ClientError> {
    let entry = prepare(entry)?;
    source.add_word(&entry).await?;
    info!(category = %entry.category(), word = %entry.word(), "Word added");
    Ok(entry)
}

/// Deletes an entry by full value.
#[instrument(skip(source, entry), fields(category = %entry.category(), word = %entry.word()))]
pub async fn delete_word(source: &dyn WordSource, entry: &WordEntry) -> Result<(), ClientError> {
    source.delete_word(entry).await?;
    info!("Word deleted");
    Ok(())
}

/// Replaces `original` with `replacement` by deleting then inserting.
///
/// Returns the replacement as stored.
#[instrument(skip(source, original, replacement), fields(original = %original.word()))]
pub async fn update_word(
    source: &dyn WordSource,
    original: &WordEntry,
    replacement: &WordEntry,
) -> Result<WordEntry, UpdateError> {
    let replacement = prepare(replacement).map_err(UpdateError::Rejected)?;

    if let Err(e) = source.delete_word(original).await {
        warn!(error = %e, "Update aborted: delete failed, catalog unchanged");
        return Err(UpdateError::DeleteFailed(e));
    }

    if let Err(e) = source.add_word(&replacement).await {
        error!(error = %e, "Update incomplete: original deleted, replacement not added");
        return Err(UpdateError::InsertFailed {
            error: e,
            original: original.clone(),
        });
    }

    info!(replacement = %replacement.word(), "Word updated");
    Ok(replacement)
}

/// Returns true if `err` came from local validation rather than the server.
pub fn is_validation(err: &ClientError) -> bool {
    err.kind == ClientErrorKind::Validation
}
