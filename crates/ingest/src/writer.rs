//! Delimited-text output for normalized datasets and skip lists.

use std::path::Path;

use tracing::info;

use crate::error::IngestError;
use crate::record::{NormalizedRecord, SkipRecord};

/// Writes the normalized dataset as comma-delimited text.
///
/// The header row is derived from the record's field names, so the on-disk
/// schema cannot drift from the in-memory one. Records are written in the
/// given (pipeline-encounter) order.
///
/// # Errors
///
/// Returns [`IngestError::Csv`] on serialization or I/O failure.
pub fn write_records(path: &Path, records: &[NormalizedRecord]) -> Result<(), IngestError> {
    let mut writer = csv::Writer::from_path(path)?;
    if records.is_empty() {
        // serialize() only emits the header alongside a first record.
        writer.write_record(crate::record::COLUMNS)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), n_records = records.len(), "dataset written");
    Ok(())
}

/// Writes the skip list (`origin,line,filename`) for manual audit.
///
/// Header lines appear with the literal filename `Header`.
///
/// # Errors
///
/// Returns [`IngestError::Csv`] on serialization or I/O failure.
pub fn write_skips(path: &Path, skips: &[SkipRecord]) -> Result<(), IngestError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["origin", "line", "filename"])?;
    for skip in skips {
        writer.write_record([
            skip.origin.as_str(),
            &skip.line.to_string(),
            &skip.reason.to_string(),
        ])?;
    }
    writer.flush().map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), n_skips = skips.len(), "skip list written");
    Ok(())
}
