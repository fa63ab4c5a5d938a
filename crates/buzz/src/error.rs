//! Error types for nox-buzz.

use std::path::PathBuf;

use nox_reference::ReferenceError;

/// Error type for all fallible operations in the nox-buzz crate.
#[derive(Debug, thiserror::Error)]
pub enum BuzzError {
    /// Wraps an I/O failure on an output file.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// Path that could not be written.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// Returned when a dataset record does not land in the prepared
    /// per-transect table. The table covers every register transect and
    /// every observed night of its site, so this means the record's
    /// transect is missing from the register.
    #[error("record at transect {transect} (site {site}, night {night}) not in prepared table")]
    UnindexedRecord {
        /// The record's transect.
        transect: u32,
        /// The record's site.
        site: u32,
        /// The record's night index.
        night: usize,
    },

    /// Returned when a transect has recordings but no activity gap ends.
    ///
    /// Only possible when every timestamp of the transect lies within the
    /// gap width of the survey epoch itself.
    #[error("no activity gap found for transect {transect}")]
    NoActivityGap {
        /// The affected transect.
        transect: u32,
    },

    /// Wraps a reference-table lookup failure.
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// Wraps a CSV serialization failure from the output writer.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },
}

impl From<csv::Error> for BuzzError {
    fn from(e: csv::Error) -> Self {
        BuzzError::Csv {
            reason: e.to_string(),
        }
    }
}
