//! Error types for nox-ingest.

use std::path::PathBuf;

use nox_filename::FilenameError;
use nox_reference::ReferenceError;

/// Error type for all fallible operations in the nox-ingest crate.
///
/// Skips and exclusions are not errors; everything here aborts the run.
/// Each variant carries enough context (file, line) to locate the offending
/// record.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Wraps an I/O failure on a source or output file.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// Returned when a line with a valid filename does not have the
    /// expected field layout. This signals an upstream format change, not
    /// bad survey data.
    #[error("{origin}:{line}: malformed line: {details}")]
    MalformedLine {
        /// Source file the line came from.
        origin: String,
        /// 1-based line number.
        line: usize,
        /// Human-readable description of the problem.
        details: String,
    },

    /// Returned when a quality metric or index field fails integer
    /// coercion in an otherwise valid line.
    #[error("{origin}:{line}: field {field} is not an integer: {value:?}")]
    Numeric {
        /// Source file the line came from.
        origin: String,
        /// 1-based line number.
        line: usize,
        /// Which field failed to parse.
        field: &'static str,
        /// The raw text of the field.
        value: String,
    },

    /// Wraps a filename-grammar failure on a name that passed validation.
    #[error(transparent)]
    Filename(#[from] FilenameError),

    /// Wraps a reference-table lookup or resolution failure.
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// Wraps a CSV serialization failure from the output writer.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },
}

impl From<csv::Error> for IngestError {
    fn from(e: csv::Error) -> Self {
        IngestError::Csv {
            reason: e.to_string(),
        }
    }
}
