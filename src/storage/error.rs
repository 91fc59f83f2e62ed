use thiserror::Error;

#[derive(Error, Debug)]
/// Errors returned by the feedback file backend.
pub enum StorageError {
    /// IO error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file could not be parsed or written as CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The temporary file could not be renamed over the target.
    #[error("failed to replace feedback file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Convenience result type for feedback file operations.
pub type StorageResult<T> = Result<T, StorageError>;
