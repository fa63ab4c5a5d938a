//! Solar-noon night table and the night index resolver.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use nox_calendar::SurveyTime;

use crate::error::ReferenceError;

/// One row per calendar date: `MM/DD/YYYY HH:MM:SS,MM/DD/YYYY HH:MM:SS`
/// (dawn half, dusk half). The dusk date is redundant and ignored.
static SUN_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\d+)/(\d+)/(\d+) (\d+):(\d+):(\d+),\d+/\d+/\d+ (\d+):(\d+):(\d+)",
    )
    .expect("sun row pattern compiles")
});

/// The night table: epoch seconds of solar noon, one entry per calendar
/// night, strictly ascending.
///
/// Index 0 is the fixed reference night before the earliest survey data
/// (2011-12-31 in the historical files). A recording belongs to night `i`
/// when its timestamp falls before the noon at index `i` and at or after
/// the noon at index `i - 1`; this positional definition is what every
/// downstream dataset means by "night".
#[derive(Debug, Clone)]
pub struct SunTable {
    noons: Vec<i64>,
}

impl SunTable {
    /// Loads the table from a sun-data file.
    ///
    /// Noon is the floor midpoint of the dawn and dusk seconds-of-day,
    /// converted through the survey epoch. File order must already be
    /// ascending; the loader verifies and refuses rather than sorts.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::Io`] on read failure,
    /// [`ReferenceError::MalformedRow`] for rows that do not match the
    /// format, and [`ReferenceError::SunTableNotAscending`] for
    /// out-of-order rows.
    pub fn from_path(path: &Path) -> Result<Self, ReferenceError> {
        let file = File::open(path).map_err(|source| ReferenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(BufReader::new(file), path)?;
        debug!(path = %path.display(), n_nights = table.len(), "sun table loaded");
        Ok(table)
    }

    pub(crate) fn parse<R: BufRead>(reader: R, path: &Path) -> Result<Self, ReferenceError> {
        let mut noons = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| ReferenceError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let row = idx + 1;
            let caps =
                SUN_ROW_RE
                    .captures(&line)
                    .ok_or_else(|| ReferenceError::MalformedRow {
                        path: path.to_path_buf(),
                        line: row,
                        details: format!("not a dawn,dusk row: {line:?}"),
                    })?;
            let num = |i: usize| -> Result<i64, ReferenceError> {
                caps[i].parse().map_err(|_| ReferenceError::MalformedRow {
                    path: path.to_path_buf(),
                    line: row,
                    details: format!("numeric field out of range: {:?}", &caps[i]),
                })
            };

            let dawn_sec = num(4)? * 3600 + num(5)? * 60 + num(6)?;
            let dusk_sec = num(7)? * 3600 + num(8)? * 60 + num(9)?;
            let noon_sec = (dawn_sec + dusk_sec).div_euclid(2);

            let noon = SurveyTime::new(
                num(3)? as i32,
                num(1)? as u32,
                num(2)? as u32,
                (noon_sec / 3600) as u32,
                (noon_sec % 3600 / 60) as u32,
                (noon_sec % 60) as u32,
            )?
            .epoch_seconds();

            if let Some(&previous) = noons.last()
                && noon <= previous
            {
                return Err(ReferenceError::SunTableNotAscending {
                    path: path.to_path_buf(),
                    line: row,
                    previous,
                    current: noon,
                });
            }
            noons.push(noon);
        }
        Ok(Self { noons })
    }

    /// Builds a table directly from noon epoch values, for consumers that
    /// already hold converted timestamps (and for tests).
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::SunTableNotAscending`] if `noons` is not
    /// strictly ascending.
    pub fn from_noons(noons: Vec<i64>) -> Result<Self, ReferenceError> {
        for (i, pair) in noons.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(ReferenceError::SunTableNotAscending {
                    path: "<memory>".into(),
                    line: i + 2,
                    previous: pair[0],
                    current: pair[1],
                });
            }
        }
        Ok(Self { noons })
    }

    /// Resolves the night a timestamp belongs to: the smallest index `i`
    /// with `epoch_seconds < noons[i]`, found by binary search.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::NightOutOfRange`] if the timestamp lies
    /// at or past the last noon; data beyond the table means the table is
    /// stale, which must abort the run.
    pub fn resolve_night(&self, epoch_seconds: i64) -> Result<usize, ReferenceError> {
        let night = self.noons.partition_point(|&noon| noon <= epoch_seconds);
        if night == self.noons.len() {
            return Err(ReferenceError::NightOutOfRange {
                epoch_seconds,
                nights: self.noons.len(),
            });
        }
        Ok(night)
    }

    /// Number of nights the table covers.
    pub fn len(&self) -> usize {
        self.noons.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.noons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_computes_floor_midpoint_noon() {
        // Dawn 08:00:00, dusk 16:00:01 -> midpoint 43200 (floor), noon 12:00:00.
        let data = "1/1/2012 8:00:00,1/1/2012 16:00:01\n";
        let table = SunTable::parse(Cursor::new(data), Path::new("SunData.csv")).unwrap();
        assert_eq!(table.len(), 1);
        let noon = SurveyTime::new(2012, 1, 1, 12, 0, 0).unwrap().epoch_seconds();
        assert_eq!(table.resolve_night(noon - 1).unwrap(), 0);
        assert!(table.resolve_night(noon).is_err());
    }

    #[test]
    fn parse_reads_mm_dd_yyyy() {
        // 3/15/2012 must be March 15, not the 3rd of month 15.
        let data = "3/15/2012 6:30:00,3/15/2012 18:30:00\n";
        let table = SunTable::parse(Cursor::new(data), Path::new("SunData.csv")).unwrap();
        let before_noon = SurveyTime::new(2012, 3, 15, 12, 29, 59)
            .unwrap()
            .epoch_seconds();
        assert_eq!(table.resolve_night(before_noon).unwrap(), 0);
    }

    #[test]
    fn malformed_row_rejected() {
        let err = SunTable::parse(Cursor::new("garbage\n"), Path::new("SunData.csv"))
            .unwrap_err();
        assert!(matches!(err, ReferenceError::MalformedRow { line: 1, .. }));
    }

    #[test]
    fn descending_input_rejected() {
        let data = "1/2/2012 8:00:00,1/2/2012 16:00:00\n1/1/2012 8:00:00,1/1/2012 16:00:00\n";
        let err =
            SunTable::parse(Cursor::new(data), Path::new("SunData.csv")).unwrap_err();
        assert!(matches!(
            err,
            ReferenceError::SunTableNotAscending { line: 2, .. }
        ));
    }

    #[test]
    fn resolve_night_buckets() {
        let table = SunTable::from_noons(vec![1000, 2000, 3000]).unwrap();
        assert_eq!(table.resolve_night(0).unwrap(), 0);
        assert_eq!(table.resolve_night(999).unwrap(), 0);
        assert_eq!(table.resolve_night(1000).unwrap(), 1);
        assert_eq!(table.resolve_night(1500).unwrap(), 1);
        assert_eq!(table.resolve_night(2500).unwrap(), 2);
    }

    #[test]
    fn resolve_night_out_of_range() {
        let table = SunTable::from_noons(vec![1000, 2000, 3000]).unwrap();
        let err = table.resolve_night(3000).unwrap_err();
        assert!(matches!(
            err,
            ReferenceError::NightOutOfRange {
                epoch_seconds: 3000,
                nights: 3,
            }
        ));
    }

    #[test]
    fn resolve_night_is_monotonic() {
        let table = SunTable::from_noons(vec![100, 350, 800, 1200, 9000]).unwrap();
        let mut last = 0;
        for t in 0..1200 {
            let night = table.resolve_night(t).unwrap();
            assert!(night >= last, "night decreased at t={t}");
            last = night;
        }
    }

    #[test]
    fn from_noons_requires_strict_ascent() {
        assert!(SunTable::from_noons(vec![100, 100]).is_err());
        assert!(SunTable::from_noons(vec![100, 99]).is_err());
        assert!(SunTable::from_noons(vec![]).unwrap().is_empty());
    }
}
