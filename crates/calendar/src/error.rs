//! Error types for the nox-calendar crate.

/// Error type for all fallible operations in the nox-calendar crate.
///
/// This enum covers validation failures for the calendar fields of a
/// [`crate::SurveyTime`]: the year must not precede the survey epoch and the
/// month, day, hour, minute, and second must all be in range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a year precedes the survey epoch (2000).
    #[error("year {year} precedes the survey epoch (must be >= 2000)")]
    YearBeforeEpoch {
        /// The out-of-domain year that was provided.
        year: i32,
    },

    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u32,
    },

    /// Returned when a day number exceeds the number of days in the given
    /// month of the given year.
    #[error("invalid day: {day} for {year}-{month:02} (max {max_day})")]
    InvalidDay {
        /// The invalid day number that was provided.
        day: u32,
        /// The month for which the day is invalid.
        month: u32,
        /// The year, which decides February's length.
        year: i32,
        /// The maximum valid day for the given month and year.
        max_day: u32,
    },

    /// Returned when an hour, minute, or second is out of range.
    #[error("invalid time of day: {hour:02}:{minute:02}:{second:02}")]
    InvalidTimeOfDay {
        /// Hour component (valid range 0..=23).
        hour: u32,
        /// Minute component (valid range 0..=59).
        minute: u32,
        /// Second component (valid range 0..=59).
        second: u32,
    },
}
