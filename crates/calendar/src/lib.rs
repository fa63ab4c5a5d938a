//! # nox-calendar
//!
//! Pure date arithmetic for the survey epoch (2000-01-01T00:00:00).
//!
//! Every timestamp in the nox datasets is an integer number of seconds since
//! the start of the year 2000, computed with an explicit Gregorian leap-year
//! rule rather than a library calendar. The sun-data night table is keyed to
//! this exact conversion, so downstream night indices are only meaningful if
//! the arithmetic here stays bit-for-bit stable.
//!
//! ## Quick Start
//!
//! ```ignore
//! use nox_calendar::{SurveyTime, is_leap_year};
//!
//! let t = SurveyTime::new(2016, 8, 15, 23, 5, 1)?;
//! assert_eq!(t.epoch_seconds() % 86_400, 23 * 3600 + 5 * 60 + 1);
//! assert!(is_leap_year(2016));
//! ```

mod epoch;
mod error;

pub use epoch::{SurveyTime, days_in_month, is_leap_year};
pub use error::CalendarError;
