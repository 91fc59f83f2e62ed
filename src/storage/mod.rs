//! Storage primitives (entry model and the CSV feedback file).

pub mod error;
pub mod file;
mod model;

pub use error::{StorageError, StorageResult};
pub use file::{ColumnMap, FeedbackFile};
pub use model::{FeedbackEntry, normalize_name};
