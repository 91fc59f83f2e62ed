use std::path::PathBuf;

use thiserror::Error;

use crate::cache::StoreError;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("CSV must include 'name' and 'ethnicity' columns (missing: {})", .missing.join(", "))]
    MissingColumns { missing: Vec<&'static str> },

    #[error("no valid feedback rows found in {}", .path.display())]
    NoValidRows { path: PathBuf },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type RecordResult<T> = Result<T, RecordError>;
