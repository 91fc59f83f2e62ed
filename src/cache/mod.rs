//! Feedback cache: exact-match index over an append-only, file-backed entry list.

pub mod error;
pub mod index;
pub mod store;
pub mod types;


pub use error::{StoreError, StoreResult};
pub use index::LookupIndex;
pub use store::FeedbackStore;
pub use types::LabelSource;
