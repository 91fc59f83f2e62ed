use thiserror::Error;

use crate::config::ConfigError;
use crate::constants::RETRYABLE_STATUS_CODES;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClassifyError {
    /// Returns `true` for throttling, upstream 5xx and transport failures.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClassifyError::Http { status, .. } => RETRYABLE_STATUS_CODES.contains(status),
            ClassifyError::Network(_) => true,
            _ => false,
        }
    }
}

pub type ClassifyResult<T> = Result<T, ClassifyError>;
