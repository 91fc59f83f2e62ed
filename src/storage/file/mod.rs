//! CSV-backed feedback file (whole-file rewrite on every persist).


use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::constants::{ETHNICITY_COLUMN, FEEDBACK_HEADER, NAME_COLUMN, NOTES_COLUMN};
use crate::storage::FeedbackEntry;
use crate::storage::error::StorageResult;

/// Positions of the known columns inside a header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    /// Index of the `name` column, if present.
    pub name: Option<usize>,
    /// Index of the `ethnicity` column, if present.
    pub ethnicity: Option<usize>,
    /// Index of the `notes` column, if present.
    pub notes: Option<usize>,
}

impl ColumnMap {
    /// Locates the known columns in `headers` (names are compared after trimming).
    pub fn from_headers(headers: &StringRecord) -> Self {
        let position = |column: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == column)
        };
        Self {
            name: position(NAME_COLUMN),
            ethnicity: position(ETHNICITY_COLUMN),
            notes: position(NOTES_COLUMN),
        }
    }

    /// Returns the required columns that are absent.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push(NAME_COLUMN);
        }
        if self.ethnicity.is_none() {
            missing.push(ETHNICITY_COLUMN);
        }
        missing
    }

    /// Builds a trimmed entry from `record`; absent columns read as empty.
    ///
    /// Returns `None` when the name or ethnicity is blank.
    pub fn entry_from(&self, record: &StringRecord) -> Option<FeedbackEntry> {
        let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("");
        let entry = FeedbackEntry::new(
            field(self.name),
            field(self.ethnicity),
            field(self.notes),
        );
        entry.is_valid().then_some(entry)
    }
}

#[derive(Debug, Clone)]
/// Reads and atomically rewrites a `name,ethnicity,notes` CSV file.
pub struct FeedbackFile {
    path: PathBuf,
}

impl FeedbackFile {
    /// Creates a handle for `path` (the file need not exist).
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if the backing file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads every valid entry in file order.
    ///
    /// A missing file yields an empty list. Rows with a blank name or ethnicity are skipped,
    /// extra columns are ignored and short rows are padded with empty fields.
    pub fn read_entries(&self) -> StorageResult<Vec<FeedbackEntry>> {
        if !self.exists() {
            debug!(path = %self.path.display(), "Feedback file not found, starting empty");
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;
        let columns = ColumnMap::from_headers(reader.headers()?);

        let mut entries = Vec::new();
        for result in reader.records() {
            let record = result?;
            if let Some(entry) = columns.entry_from(&record) {
                entries.push(entry);
            }
        }

        debug!(
            path = %self.path.display(),
            entries = entries.len(),
            "Loaded feedback file"
        );
        Ok(entries)
    }

    /// Rewrites the whole file from `entries`.
    ///
    /// Rows go to a temporary file in the same directory which is synced and then renamed
    /// over the target, so readers see either the old or the new contents. An existing
    /// file keeps its permissions.
    pub fn write_entries(&self, entries: &[FeedbackEntry]) -> StorageResult<()> {
        let dir = self.parent_dir();
        fs::create_dir_all(&dir)?;

        let mut temp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = WriterBuilder::new()
                .has_headers(false)
                .from_writer(temp.as_file_mut());
            writer.write_record(FEEDBACK_HEADER)?;
            for entry in entries {
                writer.serialize(entry)?;
            }
            writer.flush()?;
        }
        if let Ok(existing) = fs::metadata(&self.path) {
            temp.as_file().set_permissions(existing.permissions())?;
        }
        temp.as_file().sync_all()?;
        temp.persist(&self.path)?;

        debug!(
            path = %self.path.display(),
            entries = entries.len(),
            "Persisted feedback file"
        );
        Ok(())
    }

    fn parent_dir(&self) -> PathBuf {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
