//! Exact-match lookup index (in-memory).
//!
//! Keys are [`normalize_name`] of the entry name; values are positions into the store's
//! entry list. Inserting an existing key overwrites it, so the index always points at the
//! most recently added entry for a name.

use std::collections::HashMap;

use crate::storage::{FeedbackEntry, normalize_name};

/// Derived name → position map. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct LookupIndex {
    positions: HashMap<String, usize>,
}

impl LookupIndex {
    /// Creates an empty index.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index over `entries`; later entries win.
    pub fn build(entries: &[FeedbackEntry]) -> Self {
        let mut index = Self::new();
        index.rebuild(entries);
        index
    }

    /// Discards the current contents and re-indexes `entries`.
    pub fn rebuild(&mut self, entries: &[FeedbackEntry]) {
        self.positions.clear();
        for (position, entry) in entries.iter().enumerate() {
            self.insert(&entry.name, position);
        }
    }

    /// Points `name` at `position`, replacing any previous mapping.
    #[inline]
    pub fn insert(&mut self, name: &str, position: usize) -> Option<usize> {
        self.positions.insert(normalize_name(name), position)
    }

    /// Returns the position of the latest entry for `name`.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.positions.get(&normalize_name(name)).copied()
    }

    /// Number of distinct names.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
