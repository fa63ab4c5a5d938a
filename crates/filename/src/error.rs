//! Error types for nox-filename.

use nox_calendar::CalendarError;

/// Error type for all fallible operations in the nox-filename crate.
///
/// Each variant carries the offending filename so a failed run can be traced
/// back to the physical recording or photograph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilenameError {
    /// Returned when no `YYYYMMDD_HHMMSS` timestamp is present.
    ///
    /// Callers must gate on [`crate::is_valid_filename`] first; hitting this
    /// on a validated name means the validity grammar and the timestamp
    /// grammar have drifted apart.
    #[error("no timestamp in filename: {filename:?}")]
    TimeNotFound {
        /// The filename that was searched.
        filename: String,
    },

    /// Returned when no transect token matches.
    #[error("no transect token in filename: {filename:?}")]
    TransectNotFound {
        /// The filename that was searched.
        filename: String,
    },

    /// Returned when neither the `d<digits>_` token nor the positional
    /// fallback yields a detector number.
    #[error("no detector token in filename: {filename:?}")]
    DetectorNotFound {
        /// The filename that was searched.
        filename: String,
    },

    /// Returned when no compact-flash card token matches.
    #[error("no compact-flash token in filename: {filename:?}")]
    CardNotFound {
        /// The filename that was searched.
        filename: String,
    },

    /// Returned when an image-analysis filename does not match the
    /// photograph grammar.
    #[error("not an image-analysis filename: {filename:?}")]
    ImageNameMismatch {
        /// The filename that was searched.
        filename: String,
    },

    /// Returned when a matched digit run does not fit the target integer.
    #[error("numeric field {field} out of range in filename: {filename:?}")]
    NumberOutOfRange {
        /// Which extracted field overflowed.
        field: &'static str,
        /// The filename that was searched.
        filename: String,
    },

    /// Wraps an error from the nox-calendar crate for an extracted timestamp
    /// with impossible calendar fields.
    #[error("invalid timestamp in filename {filename:?}: {source}")]
    Calendar {
        /// The filename the timestamp came from.
        filename: String,
        /// The underlying calendar validation failure.
        source: CalendarError,
    },
}
