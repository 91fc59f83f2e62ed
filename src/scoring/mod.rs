//! Few-shot example selection by name similarity.
//!
//! Given a query name and the stored feedback entries, rank the entries by
//! [`similarity_ratio`] and keep the best ones as guidance for the model. [`sample`] is
//! the similarity-free fallback used when nothing scores above zero.
//!
//! Ranking sees every stored entry, including ones superseded by a later entry with the
//! same name. Only [`crate::cache::LookupIndex`] hides superseded entries.

pub mod ranker;
pub mod ratio;
pub mod types;

pub use ranker::{rank_similar, sample, score_entries};
pub use ratio::{MatchingBlock, matching_blocks, similarity_ratio};
pub use types::ScoredEntry;
