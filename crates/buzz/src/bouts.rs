//! Activity-bout annotation: time since the last silence gap.

use std::collections::BTreeMap;

use tracing::debug;

use nox_ingest::NormalizedRecord;

use crate::config::BuzzConfig;
use crate::error::BuzzError;

/// One annotated recording of the bout dataset: the normalized record plus
/// the seconds elapsed since the end of the last activity gap and a 0/1
/// feeding-buzz flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoutRow {
    /// The underlying normalized record.
    pub record: NormalizedRecord,
    /// Seconds since the end of the last activity gap at this transect.
    /// Zero when the recording itself ends a gap.
    pub gap_dt: i64,
    /// `1` when the record's buzz index reached the threshold, else `0`.
    pub buzz: u8,
}

/// Annotates a normalized dataset with per-transect bout timing.
///
/// Records are filtered by the config's final-identification first. For
/// each transect the recording timestamps are sorted and every timestamp
/// preceded by at least `gap_seconds` of silence is marked as a gap end;
/// silence is measured from the previous recording, or from the survey
/// epoch for the first one, so the first recording of a transect always
/// ends a gap. Each surviving record is then annotated with the time since
/// the most recent gap end at or before it. Output order follows input
/// encounter order.
///
/// # Errors
///
/// Returns [`BuzzError::NoActivityGap`] when a transect has recordings but
/// no gap ends, which requires every timestamp to sit within `gap_seconds`
/// of the epoch itself.
pub fn bout_dataset(
    records: &[NormalizedRecord],
    config: &BuzzConfig,
) -> Result<Vec<BoutRow>, BuzzError> {
    let filtered: Vec<&NormalizedRecord> =
        records.iter().filter(|r| config.matches(r)).collect();
    let gap_ends = activity_gap_ends(&filtered, config.gap_seconds());
    debug!(
        kept = filtered.len(),
        n_transects = gap_ends.len(),
        gap_seconds = config.gap_seconds(),
        "activity gaps resolved"
    );

    let mut rows = Vec::with_capacity(filtered.len());
    for record in filtered {
        let ends =
            gap_ends
                .get(&record.transect)
                .ok_or(BuzzError::NoActivityGap {
                    transect: record.transect,
                })?;
        let gap_dt = time_since_gap_end(ends, record.total_time_sec).ok_or(
            BuzzError::NoActivityGap {
                transect: record.transect,
            },
        )?;
        let buzz = u8::from(record.i_buzz >= config.buzz_index());
        rows.push(BoutRow {
            record: record.clone(),
            gap_dt,
            buzz,
        });
    }
    Ok(rows)
}

/// Per transect, the timestamps that end a silence gap of at least
/// `gap_seconds`, in ascending order.
fn activity_gap_ends(
    records: &[&NormalizedRecord],
    gap_seconds: i64,
) -> BTreeMap<u32, Vec<i64>> {
    let mut times: BTreeMap<u32, Vec<i64>> = BTreeMap::new();
    for record in records {
        times
            .entry(record.transect)
            .or_default()
            .push(record.total_time_sec);
    }

    let mut gap_ends = BTreeMap::new();
    for (transect, mut transect_times) in times {
        transect_times.sort_unstable();
        let mut ends = Vec::new();
        let mut last_activity = 0;
        for activity in transect_times {
            if activity - last_activity >= gap_seconds {
                ends.push(activity);
            }
            last_activity = activity;
        }
        gap_ends.insert(transect, ends);
    }
    gap_ends
}

/// Seconds between `time` and the most recent gap end at or before it.
///
/// `None` when `ends` is empty; `time` is otherwise guaranteed to be at or
/// after the first gap end, which is the transect's earliest timestamp.
fn time_since_gap_end(ends: &[i64], time: i64) -> Option<i64> {
    // First index whose gap end is at or after `time`.
    let idx = ends.partition_point(|&end| end < time);
    if ends.get(idx) == Some(&time) {
        return Some(0);
    }
    let previous = *ends.get(idx.checked_sub(1)?)?;
    Some(time - previous)
}
