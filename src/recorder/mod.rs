//! Writes newly verified labels back into the feedback store.

pub mod error;


use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::cache::FeedbackStore;
use crate::storage::{ColumnMap, FeedbackEntry};

pub use error::{RecordError, RecordResult};

/// Outcome of [`import_into`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub source: PathBuf,
    pub imported: usize,
}

/// Reads verified entries from a CSV with `name` and `ethnicity` (and optionally `notes`)
/// header columns.
///
/// A missing required column is reported before any row is read. Rows with a blank name
/// or ethnicity are skipped.
pub fn import_csv(path: &Path) -> RecordResult<Vec<FeedbackEntry>> {
    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;

    let columns = ColumnMap::from_headers(reader.headers()?);
    let missing = columns.missing_required();
    if !missing.is_empty() {
        return Err(RecordError::MissingColumns { missing });
    }

    let mut entries = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        match columns.entry_from(&record?) {
            Some(entry) => entries.push(entry),
            None => skipped += 1,
        }
    }

    debug!(path = %path.display(), entries = entries.len(), skipped, "Parsed feedback import");
    Ok(entries)
}

/// Records one verified mapping.
pub fn record_one(
    store: &mut FeedbackStore,
    name: &str,
    ethnicity: &str,
    notes: &str,
) -> RecordResult<()> {
    store.append(name, ethnicity, notes)?;
    info!(name = name.trim(), ethnicity = ethnicity.trim(), "Recorded feedback");
    Ok(())
}

/// Imports `source` into `store` with a single persist.
///
/// Fails with [`RecordError::NoValidRows`] (store untouched) if the source holds no usable row.
pub fn import_into(store: &mut FeedbackStore, source: &Path) -> RecordResult<ImportReport> {
    let entries = import_csv(source)?;
    if entries.is_empty() {
        return Err(RecordError::NoValidRows {
            path: source.to_path_buf(),
        });
    }

    let imported = store.extend(entries)?;
    info!(
        source = %source.display(),
        store = %store.path().display(),
        imported,
        "Imported feedback"
    );

    Ok(ImportReport {
        source: source.to_path_buf(),
        imported,
    })
}
