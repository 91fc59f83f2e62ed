//! The feedback store: ordered entries + lookup index + backing file.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{StoreError, StoreResult};
use super::index::LookupIndex;
use crate::scoring::{self, ScoredEntry};
use crate::storage::{FeedbackEntry, FeedbackFile};

/// Verified name → ethnicity mappings, kept in memory and on disk in lockstep.
///
/// Entries are append-only and kept in insertion order; a name may appear several times.
/// [`lookup`](Self::lookup) sees only the latest entry per name, while
/// [`rank_similar`](Self::rank_similar) and [`sample`](Self::sample) see all of them.
///
/// Every successful [`append`](Self::append) / [`extend`](Self::extend) rewrites the backing
/// file before returning. There is no protection against another process writing the same
/// file; the last persist wins.
#[derive(Debug)]
pub struct FeedbackStore {
    file: FeedbackFile,
    entries: Vec<FeedbackEntry>,
    index: LookupIndex,
}

impl FeedbackStore {
    /// Loads the store from `path`. A missing file yields an empty store.
    pub fn load(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let file = FeedbackFile::new(path.into());
        let entries = file.read_entries()?;
        let index = LookupIndex::build(&entries);
        Ok(Self {
            file,
            entries,
            index,
        })
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[FeedbackEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the most recently added entry whose name matches after trimming and
    /// case-folding.
    pub fn lookup(&self, name: &str) -> Option<&FeedbackEntry> {
        self.index
            .lookup(name)
            .and_then(|position| self.entries.get(position))
    }

    /// Returns the first `count` entries in store order.
    pub fn sample(&self, count: usize) -> Vec<&FeedbackEntry> {
        scoring::sample(&self.entries, count).iter().collect()
    }

    /// Returns up to `count` entries most similar to `name`, best first.
    pub fn rank_similar(&self, name: &str, count: usize) -> Vec<&FeedbackEntry> {
        self.rank_similar_scored(name, count)
            .into_iter()
            .map(|scored| scored.entry)
            .collect()
    }

    /// Like [`rank_similar`](Self::rank_similar) but keeps the ratios.
    pub fn rank_similar_scored(&self, name: &str, count: usize) -> Vec<ScoredEntry<'_>> {
        scoring::rank_similar(name, &self.entries, count)
    }

    /// Few-shot examples for `name`: the most similar entries, or the first `count` entries
    /// when nothing is similar.
    pub fn examples_for(&self, name: &str, count: usize) -> Vec<&FeedbackEntry> {
        let similar = self.rank_similar(name, count);
        if similar.is_empty() {
            self.sample(count)
        } else {
            similar
        }
    }

    /// Adds one entry and persists.
    ///
    /// Fields are trimmed first. Fails with [`StoreError::InvalidEntry`] (leaving the store
    /// untouched) if the name or ethnicity is blank.
    pub fn append(&mut self, name: &str, ethnicity: &str, notes: &str) -> StoreResult<()> {
        let entry = FeedbackEntry::new(name, ethnicity, notes);
        if !entry.is_valid() {
            return Err(StoreError::InvalidEntry {
                reason: "both name and ethnicity must be provided".to_string(),
            });
        }

        let before = self.entries.len();
        self.add_entry(entry);
        self.persist_or_rollback(before)
    }

    /// Adds every valid candidate and persists once.
    ///
    /// Candidates with a blank name or ethnicity are dropped silently. The file is rewritten
    /// only if at least one candidate was accepted. Returns the number accepted.
    pub fn extend<I>(&mut self, candidates: I) -> StoreResult<usize>
    where
        I: IntoIterator<Item = FeedbackEntry>,
    {
        let before = self.entries.len();
        for entry in candidates.into_iter().filter_map(FeedbackEntry::normalized) {
            self.add_entry(entry);
        }

        let added = self.entries.len() - before;
        if added == 0 {
            debug!("No valid entries in batch, feedback file untouched");
            return Ok(0);
        }

        self.persist_or_rollback(before)?;
        Ok(added)
    }

    /// Rewrites the backing file from memory.
    pub fn persist(&self) -> StoreResult<()> {
        self.file.write_entries(&self.entries)?;
        Ok(())
    }

    fn add_entry(&mut self, entry: FeedbackEntry) {
        self.index.insert(&entry.name, self.entries.len());
        self.entries.push(entry);
    }

    /// Persists; on failure drops everything added since `before` so memory matches disk.
    fn persist_or_rollback(&mut self, before: usize) -> StoreResult<()> {
        if let Err(e) = self.persist() {
            self.entries.truncate(before);
            self.index.rebuild(&self.entries);
            return Err(e);
        }
        Ok(())
    }
}
