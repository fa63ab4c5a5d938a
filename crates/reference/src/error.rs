//! Error types for nox-reference.

use std::path::PathBuf;

use nox_calendar::CalendarError;

/// Error type for all fallible operations in the nox-reference crate.
///
/// Covers I/O and parse failures while loading the reference files, and the
/// fatal lookup failures that signal a mismatch between reference data and
/// survey data.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    /// Wraps an I/O failure for a reference file.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// Returned when a reference-file row does not match its format.
    #[error("{}:{line}: malformed row: {details}", path.display())]
    MalformedRow {
        /// File the row came from.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Human-readable description of the problem.
        details: String,
    },

    /// Returned when the sun table is not strictly ascending.
    ///
    /// Ascending file order is a precondition of night resolution; refusing
    /// the table here beats mis-bucketing every record later.
    #[error("{}:{line}: sun table not ascending ({previous} then {current})", path.display())]
    SunTableNotAscending {
        /// File the table came from.
        path: PathBuf,
        /// 1-based line number of the out-of-order entry.
        line: usize,
        /// Epoch seconds of the preceding noon.
        previous: i64,
        /// Epoch seconds of the offending noon.
        current: i64,
    },

    /// Returned when a lights-off log row names an unknown short site code.
    #[error("{}:{line}: unknown site code {code:?}", path.display())]
    UnknownSiteCode {
        /// File the row came from.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// The unrecognised short code.
        code: String,
    },

    /// Returned when a transect id is absent from the transect register.
    #[error("transect {transect} not in transect register")]
    UnknownTransect {
        /// The missing transect id.
        transect: u32,
    },

    /// Returned when a site id is absent from a night calendar.
    #[error("site {site} not in {calendar} calendar")]
    UnknownSite {
        /// The missing site id.
        site: u32,
        /// Which calendar was consulted (`"allowed-nights"` or
        /// `"lights-off"`).
        calendar: &'static str,
    },

    /// Returned when a timestamp falls past the end of the sun table.
    #[error("timestamp {epoch_seconds} is beyond the sun table ({nights} nights)")]
    NightOutOfRange {
        /// The epoch timestamp that could not be bucketed.
        epoch_seconds: i64,
        /// Number of nights the table covers.
        nights: usize,
    },

    /// Wraps an error from the nox-calendar crate.
    #[error("calendar error: {source}")]
    Calendar {
        /// The underlying calendar failure.
        #[from]
        source: CalendarError,
    },
}
