//! The handwritten bat-box inspection log and its three derived datasets.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use nox_filename::fix_box_number;
use nox_reference::Transects;

use crate::error::BoxesError;

/// Leading fields of the inspection log's header line.
const HEADER_SENTINEL: &str = "transect;box";

/// Number of semicolon-delimited fields in an inspection row.
const ROW_FIELDS: usize = 12;

/// One bat-box inspection, joined with the transect register.
///
/// Individuals already caught earlier the same day are logged with a
/// `marked` remark; the loader zeroes those observations so double counts
/// cannot reach the derived datasets.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxObservation {
    /// Numeric site id, joined via the transect register.
    pub site: u32,
    /// Survey transect number.
    pub transect: u32,
    /// Bat-box number, door renumbering already corrected.
    pub box_number: u32,
    /// Experimental lamp colour of the transect.
    pub colour: String,
    /// Inspection day of month.
    pub day: u32,
    /// Inspection month.
    pub month: u32,
    /// Inspection year.
    pub year: i32,
    /// Whether droppings were present (0 or 1).
    pub poo: u8,
    /// Number of animals found.
    pub animals: u32,
    /// Species label, `pp` for the common pipistrelle.
    pub species: String,
    /// Sex of a measured individual, empty when none was handled.
    pub sex: String,
    /// Underarm length as written in the log; not always numeric.
    pub ual: String,
    /// Body mass as written in the log; not always numeric.
    pub mass: String,
    /// Free-text remark.
    pub remarks: String,
}

/// Loads the inspection log, joining each row with the transect register.
///
/// Rows are
/// `transect;box;day;month;year;poo;animals;species;sex;ual;mass;remarks`;
/// the remark keeps any further semicolons. Rows whose remark starts with
/// `marked` have their animal fields cleared, and the box-door renumbering
/// is corrected.
///
/// # Errors
///
/// Returns [`BoxesError`] on I/O failure, malformed rows, or a transect
/// missing from the register.
pub fn load_box_survey(
    path: &Path,
    transects: &Transects,
) -> Result<Vec<BoxObservation>, BoxesError> {
    let file = File::open(path).map_err(|source| BoxesError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut observations = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| BoxesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let row = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(HEADER_SENTINEL) {
            continue;
        }
        let fields: Vec<&str> = trimmed.splitn(ROW_FIELDS, ';').collect();
        if fields.len() < ROW_FIELDS {
            return Err(BoxesError::MalformedRow {
                path: path.to_path_buf(),
                line: row,
                details: format!("expected {ROW_FIELDS} fields, got {}", fields.len()),
            });
        }
        let int = |i: usize, name: &str| -> Result<i64, BoxesError> {
            fields[i]
                .trim()
                .parse()
                .map_err(|_| BoxesError::MalformedRow {
                    path: path.to_path_buf(),
                    line: row,
                    details: format!("{name} is not an integer: {:?}", fields[i]),
                })
        };

        let transect = int(0, "transect")? as u32;
        let info = transects.get(transect)?;
        let mut observation = BoxObservation {
            site: info.site,
            transect,
            box_number: fix_box_number(int(1, "box")? as u32),
            colour: info.colour.clone(),
            day: int(2, "day")? as u32,
            month: int(3, "month")? as u32,
            year: int(4, "year")? as i32,
            poo: int(5, "poo")? as u8,
            animals: int(6, "animals")? as u32,
            species: fields[7].to_string(),
            sex: fields[8].to_string(),
            ual: fields[9].to_string(),
            mass: fields[10].to_string(),
            remarks: fields[11].to_string(),
        };
        if observation.remarks.starts_with("marked") {
            observation.animals = 0;
            observation.species.clear();
            observation.sex.clear();
            observation.ual.clear();
            observation.mass.clear();
            observation.remarks.clear();
        }
        observations.push(observation);
    }
    debug!(path = %path.display(), n_observations = observations.len(), "box survey loaded");
    Ok(observations)
}

/// One transect of the occupancy dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupancyRow {
    /// Numeric site id of the transect.
    pub site: u32,
    /// Survey transect number.
    pub transect: u32,
    /// Experimental lamp colour of the transect.
    pub colour: String,
    /// 1 when droppings attributable to the common pipistrelle were found
    /// anywhere on the transect.
    pub pp_poo: u8,
    /// 1 when any droppings were found anywhere on the transect.
    pub bat_poo: u8,
    /// Number of common pipistrelles found.
    pub pp: u32,
    /// Number of bats found, regardless of species.
    pub bats: u32,
}

/// Scores droppings presence and counts bats per transect.
///
/// Droppings count toward `pp_poo` unless the remark starts with `poo`,
/// the field convention for droppings that are visibly not from the common
/// pipistrelle. Rows come out in ascending transect order.
pub fn occupancy_dataset(observations: &[BoxObservation]) -> Vec<OccupancyRow> {
    let mut table: BTreeMap<u32, OccupancyRow> = BTreeMap::new();
    for obs in observations {
        let row = table.entry(obs.transect).or_insert_with(|| OccupancyRow {
            site: obs.site,
            transect: obs.transect,
            colour: obs.colour.clone(),
            pp_poo: 0,
            bat_poo: 0,
            pp: 0,
            bats: 0,
        });
        row.bat_poo |= u8::from(obs.poo != 0);
        if !obs.remarks.starts_with("poo") {
            row.pp_poo |= u8::from(obs.poo != 0);
        }
        row.bats += obs.animals;
        if obs.species == "pp" {
            row.pp += obs.animals;
        }
    }
    table.into_values().collect()
}

/// One measured individual of the body-measurement dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyMeasurementRow {
    /// Numeric site id of the transect.
    pub site: u32,
    /// Survey transect number.
    pub transect: u32,
    /// Bat-box number.
    pub box_number: u32,
    /// Experimental lamp colour of the transect.
    pub colour: String,
    /// Inspection day of month.
    pub day: u32,
    /// Inspection month.
    pub month: u32,
    /// Inspection year.
    pub year: i32,
    /// Species label.
    pub species: String,
    /// Sex of the individual.
    pub sex: String,
    /// Underarm length as written in the log.
    pub ual: String,
    /// Body mass as written in the log.
    pub mass: String,
    /// Body condition index, mass over underarm length. `None` when either
    /// measurement is non-numeric, written out as `NA`.
    pub bci: Option<f64>,
}

/// Extracts every handled individual with its body condition index.
///
/// An observation counts as a measured bat when its sex field is
/// non-empty; marked re-catches were cleared at load time and drop out
/// here.
pub fn body_measurement_dataset(observations: &[BoxObservation]) -> Vec<BodyMeasurementRow> {
    observations
        .iter()
        .filter(|obs| !obs.sex.is_empty())
        .map(|obs| {
            let bci = match (obs.mass.trim().parse::<f64>(), obs.ual.trim().parse::<f64>()) {
                (Ok(mass), Ok(ual)) => Some(mass / ual),
                _ => None,
            };
            BodyMeasurementRow {
                site: obs.site,
                transect: obs.transect,
                box_number: obs.box_number,
                colour: obs.colour.clone(),
                day: obs.day,
                month: obs.month,
                year: obs.year,
                species: obs.species.clone(),
                sex: obs.sex.clone(),
                ual: obs.ual.clone(),
                mass: obs.mass.clone(),
                bci,
            }
        })
        .collect()
}

/// One transect-sex cell of the sex-count dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SexCountRow {
    /// Survey transect number.
    pub transect: u32,
    /// Numeric site id of the transect.
    pub site: u32,
    /// Experimental lamp colour of the transect.
    pub colour: String,
    /// `male` or `female`.
    pub sex: String,
    /// Number of common pipistrelles of that sex.
    pub pp: u32,
}

/// Counts sexed common pipistrelles per transect.
///
/// Every observed transect yields a `male` and a `female` row, zeros
/// included, in ascending transect order.
pub fn sex_count_dataset(observations: &[BoxObservation]) -> Vec<SexCountRow> {
    let mut table: BTreeMap<u32, (String, u32, u32, u32)> = BTreeMap::new();
    for obs in observations {
        let entry = table
            .entry(obs.transect)
            .or_insert_with(|| (obs.colour.clone(), obs.site, 0, 0));
        if obs.species == "pp" {
            match obs.sex.as_str() {
                "male" => entry.2 += 1,
                "female" => entry.3 += 1,
                _ => {}
            }
        }
    }
    table
        .into_iter()
        .flat_map(|(transect, (colour, site, male, female))| {
            [
                SexCountRow {
                    transect,
                    site,
                    colour: colour.clone(),
                    sex: "male".to_string(),
                    pp: male,
                },
                SexCountRow {
                    transect,
                    site,
                    colour,
                    sex: "female".to_string(),
                    pp: female,
                },
            ]
        })
        .collect()
}
