//! Name classification: prompt building, the model client and row annotation.

pub mod annotate;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod prompt;
pub mod provider;
pub mod retry;
pub mod rows;

#[cfg(test)]
mod tests;

pub use annotate::{AnnotateOptions, Annotated, AnnotationSummary, annotate_rows};
pub use error::{ClassifyError, ClassifyResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockLabelProvider, RecordedCall};
pub use prompt::{DEFAULT_PROMPT, build_prompt, user_message};
pub use provider::{LabelProvider, OpenAiProvider, extract_label};
pub use retry::RetryPolicy;
pub use rows::{Row, derive_output_path, insert_label, read_rows, row_name, write_rows};
