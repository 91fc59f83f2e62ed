//! Ethnicity tagger library crate (used by the `tagger` binary and integration tests).
//!
//! # Public API Surface
//!
//! ## Feedback cache
//! - [`FeedbackStore`] - verified name → ethnicity entries, persisted as CSV
//! - [`LookupIndex`] - normalized-name index, latest entry wins
//! - [`FeedbackEntry`], [`normalize_name`] - entry model and key normalization
//!
//! ## Similarity
//! - [`rank_similar`], [`similarity_ratio`] - longest-matching-block ranking for few-shot
//!   example selection
//!
//! ## Classification
//! - [`LabelProvider`], [`OpenAiProvider`] - model client seam and its HTTP implementation
//! - [`annotate_rows`], [`AnnotateOptions`] - cache-first row annotation
//!
//! ## Recording
//! - [`recorder::import_into`], [`recorder::record_one`] - write verified labels back
//!
//! ## Test/Mock Support
//! [`MockLabelProvider`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod classify;
pub mod config;
pub mod constants;
pub mod recorder;
pub mod scoring;
pub mod storage;

pub use cache::{FeedbackStore, LabelSource, LookupIndex, StoreError, StoreResult};

#[cfg(any(test, feature = "mock"))]
pub use classify::MockLabelProvider;
pub use classify::{
    AnnotateOptions, Annotated, AnnotationSummary, ClassifyError, ClassifyResult, LabelProvider,
    OpenAiProvider, RetryPolicy, annotate_rows,
};

pub use config::{Config, ConfigError, DotEnv};

pub use recorder::{ImportReport, RecordError, RecordResult};

pub use scoring::{ScoredEntry, rank_similar, similarity_ratio};

pub use storage::{FeedbackEntry, FeedbackFile, StorageError, normalize_name};
