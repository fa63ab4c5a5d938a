//! Error types for nox-boxes.

use std::path::PathBuf;

use nox_filename::FilenameError;
use nox_reference::ReferenceError;

/// Error type for all fallible operations in the nox-boxes crate.
#[derive(Debug, thiserror::Error)]
pub enum BoxesError {
    /// Wraps an I/O failure on an input or output file.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that could not be read or written.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// Returned when a survey-log or image-export row does not match its
    /// format.
    #[error("{}:{line}: malformed row: {details}", path.display())]
    MalformedRow {
        /// File the row came from.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Human-readable description of the problem.
        details: String,
    },

    /// Returned when a photograph's oval selection has zero area, which
    /// would make the droppings ratio undefined.
    #[error("zero oval area for box {box_number} at transect {transect}")]
    ZeroTotalArea {
        /// The affected transect.
        transect: u32,
        /// The affected box.
        box_number: u32,
    },

    /// Wraps a photograph-filename grammar failure.
    #[error(transparent)]
    Filename(#[from] FilenameError),

    /// Wraps a transect-register lookup failure.
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// Wraps a CSV serialization failure from the output writer.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },
}

impl From<csv::Error> for BoxesError {
    fn from(e: csv::Error) -> Self {
        BoxesError::Csv {
            reason: e.to_string(),
        }
    }
}
