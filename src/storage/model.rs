//! Storage model types.

use serde::{Deserialize, Serialize};

/// One verified name → ethnicity mapping.
///
/// Written to the feedback file as a `name,ethnicity,notes` row.
///
/// # Example
/// ```rust
/// use tagger::FeedbackEntry;
///
/// let entry = FeedbackEntry::new("  Rahul Sharma ", "Indian", "");
/// assert_eq!(entry.name, "Rahul Sharma");
/// assert!(entry.is_valid());
/// ```
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
pub struct FeedbackEntry {
    /// Display-form personal name.
    pub name: String,
    /// Free-text label.
    pub ethnicity: String,
    /// Optional annotation.
    #[serde(default)]
    pub notes: String,
}

impl FeedbackEntry {
    /// Creates an entry with every field trimmed. Does not validate.
    pub fn new(name: &str, ethnicity: &str, notes: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            ethnicity: ethnicity.trim().to_string(),
            notes: notes.trim().to_string(),
        }
    }

    /// Returns `true` if both `name` and `ethnicity` are non-empty after trimming.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && !self.ethnicity.trim().is_empty()
    }

    /// Trims all fields and returns the entry if it satisfies [`is_valid`](Self::is_valid).
    pub fn normalized(self) -> Option<Self> {
        let entry = Self::new(&self.name, &self.ethnicity, &self.notes);
        entry.is_valid().then_some(entry)
    }
}

/// Lookup key for a name: trimmed and lower-cased.
///
/// ```rust
/// assert_eq!(tagger::normalize_name("  ANA  "), "ana");
/// ```
#[inline]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
