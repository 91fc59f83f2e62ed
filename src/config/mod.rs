//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `OPENAI_*` / `TAGGER_*` environment variables
//! or a `.env` file; real environment variables take precedence over `.env` values.

pub mod dotenv;
pub mod error;


pub use dotenv::DotEnv;
pub use error::ConfigError;

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_CA_BUNDLE, DEFAULT_FEEDBACK_STORE, DEFAULT_FEWSHOT_COUNT,
    DEFAULT_MAX_ATTEMPTS, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RETRY_BACKOFF_MS,
};

/// Runtime configuration.
///
/// Use [`Config::from_env`] or [`Config::from_env_with`] to read overrides on top of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Bearer token for the completion endpoint. Required only for classification.
    pub api_key: Option<String>,

    /// Model name. Default: `gpt-4o-mini`.
    pub model: String,

    /// Chat-completions endpoint URL.
    pub api_url: String,

    /// Extra PEM root certificate bundle; ignored if the file does not exist.
    pub ca_bundle: Option<PathBuf>,

    /// Feedback CSV path. Default: `feedback.csv`.
    pub feedback_store: PathBuf,

    /// Few-shot examples per prompt. Default: `5`.
    pub fewshot_count: usize,

    /// Attempts per model call (including the first). Default: `3`.
    pub max_attempts: u32,

    /// Backoff unit; attempt `n` waits `n × retry_backoff` before retrying. Default: 2s.
    pub retry_backoff: Duration,

    /// Per-request timeout. Default: 60s.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            ca_bundle: Some(PathBuf::from(DEFAULT_CA_BUNDLE)),
            feedback_store: PathBuf::from(DEFAULT_FEEDBACK_STORE),
            fewshot_count: DEFAULT_FEWSHOT_COUNT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub const ENV_API_KEY: &'static str = "OPENAI_API_KEY";
    const ENV_MODEL: &'static str = "OPENAI_MODEL";
    const ENV_API_URL: &'static str = "OPENAI_API_URL";
    const ENV_CA_BUNDLE: &'static str = "OPENAI_CA_BUNDLE";
    const ENV_FEEDBACK_STORE: &'static str = "TAGGER_FEEDBACK_STORE";
    const ENV_FEWSHOT_COUNT: &'static str = "TAGGER_FEWSHOT_COUNT";
    const ENV_MAX_ATTEMPTS: &'static str = "TAGGER_MAX_ATTEMPTS";
    const ENV_RETRY_BACKOFF_MS: &'static str = "TAGGER_RETRY_BACKOFF_MS";
    const ENV_REQUEST_TIMEOUT_SECS: &'static str = "TAGGER_REQUEST_TIMEOUT_SECS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), consulting `dotenv` for variables the environment
    /// does not set.
    pub fn from_env_with(dotenv: &DotEnv) -> Result<Self, ConfigError> {
        Self::from_lookup(|name| {
            env::var(name)
                .ok()
                .or_else(|| dotenv.get(name).map(str::to_string))
        })
    }

    /// Builds a config from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(Self::ENV_API_KEY);
        let model = get(Self::ENV_MODEL).unwrap_or(defaults.model);
        let api_url = get(Self::ENV_API_URL).unwrap_or(defaults.api_url);
        let ca_bundle = get(Self::ENV_CA_BUNDLE)
            .map(PathBuf::from)
            .or(defaults.ca_bundle);
        let feedback_store = get(Self::ENV_FEEDBACK_STORE)
            .map(PathBuf::from)
            .unwrap_or(defaults.feedback_store);

        let fewshot_count = Self::parse_number(
            Self::ENV_FEWSHOT_COUNT,
            get(Self::ENV_FEWSHOT_COUNT),
            defaults.fewshot_count,
        )?;
        let max_attempts = Self::parse_number(
            Self::ENV_MAX_ATTEMPTS,
            get(Self::ENV_MAX_ATTEMPTS),
            defaults.max_attempts,
        )?;
        let retry_backoff = Self::parse_number(
            Self::ENV_RETRY_BACKOFF_MS,
            get(Self::ENV_RETRY_BACKOFF_MS),
            defaults.retry_backoff.as_millis() as u64,
        )
        .map(Duration::from_millis)?;
        let request_timeout = Self::parse_number(
            Self::ENV_REQUEST_TIMEOUT_SECS,
            get(Self::ENV_REQUEST_TIMEOUT_SECS),
            defaults.request_timeout.as_secs(),
        )
        .map(Duration::from_secs)?;

        Ok(Self {
            api_key,
            model,
            api_url,
            ca_bundle,
            feedback_store,
            fewshot_count,
            max_attempts,
            retry_backoff,
            request_timeout,
        })
    }

    /// Validates basic invariants (does not create files).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_MAX_ATTEMPTS,
                reason: "must be at least 1".to_string(),
            });
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_REQUEST_TIMEOUT_SECS,
                reason: "must be at least 1 second".to_string(),
            });
        }

        if self.feedback_store.exists() && !self.feedback_store.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.feedback_store.clone(),
            });
        }

        Ok(())
    }

    /// Returns the API key or [`ConfigError::MissingEnvVar`].
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .ok_or(ConfigError::MissingEnvVar {
                name: Self::ENV_API_KEY,
            })
    }

    /// Returns the CA bundle path only if it points at an existing file.
    pub fn ca_bundle_if_present(&self) -> Option<&Path> {
        self.ca_bundle.as_deref().filter(|p| p.is_file())
    }

    fn parse_number<T>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr<Err = std::num::ParseIntError>,
    {
        match value {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::InvalidNumber {
                    name,
                    value,
                    source,
                }),
            None => Ok(default),
        }
    }
}
