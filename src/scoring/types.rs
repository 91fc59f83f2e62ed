use crate::storage::FeedbackEntry;

#[derive(Debug, Clone, PartialEq)]
/// A stored entry annotated with its similarity to a query.
pub struct ScoredEntry<'a> {
    /// Position of the entry in store order.
    pub position: usize,
    /// The entry itself.
    pub entry: &'a FeedbackEntry,
    /// Similarity ratio in `[0.0, 1.0]`.
    pub ratio: f64,
}

impl<'a> ScoredEntry<'a> {
    /// Creates a new scored-entry record.
    pub fn new(position: usize, entry: &'a FeedbackEntry, ratio: f64) -> Self {
        Self {
            position,
            entry,
            ratio,
        }
    }

    /// Returns `true` if the entry shares at least one matching block with the query.
    pub fn is_similar(&self) -> bool {
        self.ratio > 0.0
    }
}

impl std::fmt::Display for ScoredEntry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:.4})", self.entry.name, self.ratio)
    }
}
