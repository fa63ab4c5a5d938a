//! Delimited-text output for the bat-box datasets.

use std::path::Path;

use tracing::info;

use crate::error::BoxesError;
use crate::images::BoxImageRow;
use crate::survey::{BodyMeasurementRow, OccupancyRow, SexCountRow};

const OCCUPANCY_COLUMNS: [&str; 7] =
    ["site", "transect", "colour", "pp_poo", "bat_poo", "pp", "bats"];
const MEASUREMENT_COLUMNS: [&str; 12] = [
    "site", "transect", "box", "colour", "day", "month", "year", "species", "sex", "ual",
    "mass", "bci",
];
const SEX_COLUMNS: [&str; 5] = ["transect", "site", "colour", "sex", "pp"];
const IMAGE_COLUMNS: [&str; 10] = [
    "site", "transect", "box", "colour", "year", "month", "day", "particle_area",
    "total_area", "area_ratio",
];

/// Writes the per-transect occupancy dataset.
///
/// # Errors
///
/// Returns [`BoxesError::Csv`] on serialization or I/O failure.
pub fn write_occupancy(path: &Path, rows: &[OccupancyRow]) -> Result<(), BoxesError> {
    let mut writer = csv::Writer::from_path(path)?;
    if rows.is_empty() {
        writer.write_record(OCCUPANCY_COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    flush(writer, path, rows.len(), "occupancy dataset written")
}

/// Writes the body-measurement dataset; an unknown body condition index is
/// written as `NA`.
///
/// # Errors
///
/// Returns [`BoxesError::Csv`] on serialization or I/O failure.
pub fn write_body_measurements(
    path: &Path,
    rows: &[BodyMeasurementRow],
) -> Result<(), BoxesError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(MEASUREMENT_COLUMNS)?;
    for row in rows {
        let bci = match row.bci {
            Some(value) => value.to_string(),
            None => "NA".to_string(),
        };
        writer.write_record([
            row.site.to_string().as_str(),
            &row.transect.to_string(),
            &row.box_number.to_string(),
            row.colour.as_str(),
            &row.day.to_string(),
            &row.month.to_string(),
            &row.year.to_string(),
            row.species.as_str(),
            row.sex.as_str(),
            row.ual.as_str(),
            row.mass.as_str(),
            &bci,
        ])?;
    }
    flush(writer, path, rows.len(), "body-measurement dataset written")
}

/// Writes the sexed pipistrelle counts.
///
/// # Errors
///
/// Returns [`BoxesError::Csv`] on serialization or I/O failure.
pub fn write_sex_counts(path: &Path, rows: &[SexCountRow]) -> Result<(), BoxesError> {
    let mut writer = csv::Writer::from_path(path)?;
    if rows.is_empty() {
        writer.write_record(SEX_COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    flush(writer, path, rows.len(), "sex-count dataset written")
}

/// Writes the droppings-photograph dataset.
///
/// # Errors
///
/// Returns [`BoxesError::Csv`] on serialization or I/O failure.
pub fn write_box_images(path: &Path, rows: &[BoxImageRow]) -> Result<(), BoxesError> {
    let mut writer = csv::Writer::from_path(path)?;
    if rows.is_empty() {
        writer.write_record(IMAGE_COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    flush(writer, path, rows.len(), "droppings dataset written")
}

fn flush<W: std::io::Write>(
    mut writer: csv::Writer<W>,
    path: &Path,
    n_rows: usize,
    message: &'static str,
) -> Result<(), BoxesError> {
    writer.flush().map_err(|source| BoxesError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), n_rows, message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupancy_header_matches_serialized_fields() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("occupancy.csv");
        write_occupancy(
            &path,
            &[OccupancyRow {
                site: 1,
                transect: 2,
                colour: "red".to_string(),
                pp_poo: 1,
                bat_poo: 1,
                pp: 3,
                bats: 4,
            }],
        )
        .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec![&OCCUPANCY_COLUMNS.join(",")[..], "1,2,red,1,1,3,4"]
        );
    }

    #[test]
    fn missing_bci_written_as_na() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("measurements.csv");
        write_body_measurements(
            &path,
            &[BodyMeasurementRow {
                site: 1,
                transect: 2,
                box_number: 45,
                colour: "red".to_string(),
                day: 14,
                month: 7,
                year: 2014,
                species: "pp".to_string(),
                sex: "male".to_string(),
                ual: ">20".to_string(),
                mass: "6.5".to_string(),
                bci: None,
            }],
        )
        .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.lines().nth(1).unwrap().ends_with(",NA"));
    }

    #[test]
    fn image_rows_keep_box_column_name() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("images.csv");
        write_box_images(
            &path,
            &[BoxImageRow {
                site: 1,
                transect: 2,
                box_number: 45,
                colour: "red".to_string(),
                year: 2014,
                month: 7,
                day: 28,
                particle_area: 200,
                total_area: 5000,
                area_ratio: 0.04,
            }],
        )
        .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), IMAGE_COLUMNS.join(","));
        assert_eq!(lines.next().unwrap(), "1,2,45,red,2014,7,28,200,5000,0.04");
    }

    #[test]
    fn empty_sex_counts_still_have_header() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("sex.csv");
        write_sex_counts(&path, &[]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end(), SEX_COLUMNS.join(","));
    }
}
