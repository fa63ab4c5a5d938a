//! Delimited-text output for the feeding-buzz and bout datasets.

use std::path::Path;

use tracing::info;

use nox_ingest::COLUMNS;

use crate::bouts::BoutRow;
use crate::error::BuzzError;
use crate::feeding::FeedingBuzzRow;

/// Column names of the feeding-buzz dataset.
const FEEDING_COLUMNS: [&str; 6] = ["site", "transect", "colour", "night", "total", "feed_buzz"];

/// Writes the feeding-buzz dataset as comma-delimited text.
///
/// # Errors
///
/// Returns [`BuzzError::Csv`] on serialization or I/O failure.
pub fn write_feeding_buzz(path: &Path, rows: &[FeedingBuzzRow]) -> Result<(), BuzzError> {
    let mut writer = csv::Writer::from_path(path)?;
    if rows.is_empty() {
        writer.write_record(FEEDING_COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|source| BuzzError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), n_rows = rows.len(), "feeding-buzz dataset written");
    Ok(())
}

/// Writes the bout dataset: the normalized-record columns followed by
/// `gap_dt` and `buzz`.
///
/// # Errors
///
/// Returns [`BuzzError::Csv`] on serialization or I/O failure.
pub fn write_bouts(path: &Path, rows: &[BoutRow]) -> Result<(), BuzzError> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut header: Vec<&str> = COLUMNS.to_vec();
    header.extend(["gap_dt", "buzz"]);
    writer.write_record(&header)?;
    for row in rows {
        let r = &row.record;
        writer.write_record([
            r.filename.as_str(),
            &r.transect.to_string(),
            &r.site.to_string(),
            r.colour.as_str(),
            &r.night.to_string(),
            &r.total_time_sec.to_string(),
            &r.detector.to_string(),
            r.comp_fl.as_str(),
            r.final_id.as_str(),
            r.contact.as_str(),
            r.group.as_str(),
            &r.group_index.to_string(),
            r.species.as_str(),
            &r.species_index.to_string(),
            &r.nb_calls.to_string(),
            &r.med_freq.to_string(),
            &r.med_int.to_string(),
            &r.i_qual.to_string(),
            &r.i_sc.to_string(),
            &r.i_buzz.to_string(),
            &row.gap_dt.to_string(),
            &row.buzz.to_string(),
        ])?;
    }
    writer.flush().map_err(|source| BuzzError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), n_rows = rows.len(), "bout dataset written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    #[test]
    fn feeding_buzz_header_and_rows() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("fb.csv");
        write_feeding_buzz(
            &path,
            &[FeedingBuzzRow {
                site: 1,
                transect: 2,
                colour: "red".to_string(),
                night: 45,
                total: 7,
                feed_buzz: 3,
            }],
        )
        .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec!["site,transect,colour,night,total,feed_buzz", "1,2,red,45,7,3"]
        );
    }

    #[test]
    fn empty_feeding_buzz_still_has_header() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("fb.csv");
        write_feeding_buzz(&path, &[]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end(), FEEDING_COLUMNS.join(","));
    }

    #[test]
    fn bout_rows_extend_record_columns() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("bouts.csv");
        write_bouts(
            &path,
            &[BoutRow {
                record: record(1, 1, 45, 390_002_400, 2),
                gap_dt: 12,
                buzz: 1,
            }],
        )
        .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("filename,transect,site"));
        assert!(header.ends_with("i_buzz,gap_dt,buzz"));
        assert!(lines.next().unwrap().ends_with(",12,1"));
    }
}
