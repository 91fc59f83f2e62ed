use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by [`crate::cache::FeedbackStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Name or ethnicity was blank after trimming.
    #[error("invalid entry: {reason}")]
    InvalidEntry { reason: String },

    /// Reading or persisting the backing file failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type StoreResult<T> = Result<T, StoreError>;
