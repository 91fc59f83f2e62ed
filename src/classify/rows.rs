//! Raw CSV row I/O for annotation input and output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use tracing::debug;

use super::error::ClassifyResult;
use crate::constants::{OUTPUT_LABEL_POSITION, OUTPUT_SUFFIX};

pub type Row = Vec<String>;

/// Reads every record of `path` verbatim. Ragged rows are allowed; no header handling.
pub fn read_rows(path: &Path) -> ClassifyResult<Vec<Row>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(path = %path.display(), rows = rows.len(), "Read input rows");
    Ok(rows)
}

/// Writes `rows` to `path`, creating parent directories as needed.
pub fn write_rows(path: &Path, rows: &[Row]) -> ClassifyResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .from_writer(BufWriter::new(file));
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = rows.len(), "Wrote output rows");
    Ok(())
}

/// Inserts `label` at the label column, or at the end of a shorter row.
pub fn insert_label(row: &mut Row, label: impl Into<String>) {
    let position = OUTPUT_LABEL_POSITION.min(row.len());
    row.insert(position, label.into());
}

/// Name cell of a row: the first column, trimmed.
pub fn row_name(row: &[String]) -> &str {
    row.first().map(|cell| cell.trim()).unwrap_or("")
}

/// Output path for `input`: `explicit` if given, else `<stem>_with_ethnicity.csv` beside it.
pub fn derive_output_path(input: &Path, explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}.csv", stem, OUTPUT_SUFFIX))
}
