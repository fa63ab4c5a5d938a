//! Conversion from calendar fields to seconds since the survey epoch.

use crate::error::CalendarError;

/// Seconds in one day.
const DAY: i64 = 24 * 3600;

/// Number of days in each month of a common year (index 0 unused,
/// index 1 = January, ..., index 12 = December).
const DAYS_PER_MONTH: [u32; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Returns whether `year` is a Gregorian leap year.
///
/// Divisible by 4, except centuries, except multiples of 400.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the number of days in the given month of the given year.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    let mut days = DAYS_PER_MONTH[month as usize];
    if month == 2 && is_leap_year(year) {
        days = 29;
    }
    Ok(days)
}

/// A validated calendar timestamp within the survey domain (year >= 2000).
///
/// Construction checks every field, so [`SurveyTime::epoch_seconds`] is
/// infallible. All timestamps are naive: the field protocol records local
/// clock time and never switches zones mid-survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurveyTime {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
}

impl PartialOrd for SurveyTime {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SurveyTime {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Lexicographic on the fields, consistent with epoch order.
        (
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        )
            .cmp(&(
                other.year,
                other.month,
                other.day,
                other.hour,
                other.minute,
                other.second,
            ))
    }
}

impl SurveyTime {
    /// Creates a new `SurveyTime` from calendar fields.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] if the year precedes 2000, the month or day
    /// is invalid for the Gregorian calendar, or the time of day is out of
    /// range.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, CalendarError> {
        if year < 2000 {
            return Err(CalendarError::YearBeforeEpoch { year });
        }
        let max_day = days_in_month(year, month)?;
        if !(1..=max_day).contains(&day) {
            return Err(CalendarError::InvalidDay {
                day,
                month,
                year,
                max_day,
            });
        }
        if hour > 23 || minute > 59 || second > 59 {
            return Err(CalendarError::InvalidTimeOfDay {
                hour,
                minute,
                second,
            });
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u32 {
        self.month
    }

    /// Returns the day within the month (1..=31).
    pub fn day(self) -> u32 {
        self.day
    }

    /// Converts this timestamp to whole seconds since 2000-01-01T00:00:00.
    ///
    /// The accumulation order matches the historical dataset definition:
    /// 365 days for every elapsed year since 2000 plus one leap day per
    /// elapsed leap year, then the elapsed months of the current year
    /// (February lengthened in leap years), then the elapsed days, hours,
    /// minutes, and seconds.
    pub fn epoch_seconds(self) -> i64 {
        let mut total = 0i64;
        for yr in 2000..self.year {
            total += 365 * DAY;
            if is_leap_year(yr) {
                total += DAY;
            }
        }
        for mon in 1..self.month {
            // Validated month, so the unwrap cannot fire.
            let days = days_in_month(self.year, mon).expect("month in 1..=12") as i64;
            total += days * DAY;
        }
        total += (self.day as i64 - 1) * DAY
            + self.hour as i64 * 3600
            + self.minute as i64 * 60
            + self.second as i64;
        total
    }
}
