//! Droppings quantification from bat-box photographs.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use nox_filename::{AreaKind, fix_box_number, parse_image_filename};
use nox_reference::Transects;

use crate::error::BoxesError;

/// One photographed box floor: total area, droppings area, and their ratio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxImageRow {
    /// Numeric site id of the transect.
    pub site: u32,
    /// Survey transect number.
    pub transect: u32,
    /// Bat-box number, door renumbering already corrected.
    #[serde(rename = "box")]
    pub box_number: u32,
    /// Experimental lamp colour of the transect.
    pub colour: String,
    /// Photograph year.
    pub year: i32,
    /// Photograph month.
    pub month: u32,
    /// Photograph day.
    pub day: u32,
    /// Summed droppings-particle area in pixels.
    pub particle_area: i64,
    /// Oval selection area in pixels.
    pub total_area: i64,
    /// `particle_area / total_area`.
    pub area_ratio: f64,
}

/// Key identifying one photographed box floor on one date.
type MeasurementKey = (u32, u32, i32, u32, u32);

/// Builds the droppings dataset from a combined image-analysis export.
///
/// The export holds `filename,area` lines. Every `oval` line opens a
/// measurement with its total area; every `particles` line adds its area to
/// all measurements of the same box and date, regardless of where the lines
/// sit relative to each other in the export. Particle lines with no matching
/// oval anywhere in the export are dropped. Measurements come out in oval
/// encounter order, joined with the transect register.
///
/// # Errors
///
/// Returns [`BoxesError`] on I/O failure, malformed lines or filenames, a
/// transect missing from the register, or a zero-area oval selection.
pub fn image_dataset(
    path: &Path,
    transects: &Transects,
) -> Result<Vec<BoxImageRow>, BoxesError> {
    let file = File::open(path).map_err(|source| BoxesError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // Ovals first, particles after: the export interleaves the two kinds in
    // photograph order, so a particle line may precede its oval.
    let mut rows: Vec<BoxImageRow> = Vec::new();
    let mut by_key: BTreeMap<MeasurementKey, Vec<usize>> = BTreeMap::new();
    let mut particles: Vec<(MeasurementKey, i64)> = Vec::new();
    let mut orphan_particles = 0u64;

    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| BoxesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let row = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (filename, area_text) =
            trimmed
                .split_once(',')
                .ok_or_else(|| BoxesError::MalformedRow {
                    path: path.to_path_buf(),
                    line: row,
                    details: "expected filename,area".to_string(),
                })?;
        let area: i64 =
            area_text
                .trim()
                .parse()
                .map_err(|_| BoxesError::MalformedRow {
                    path: path.to_path_buf(),
                    line: row,
                    details: format!("area is not an integer: {area_text:?}"),
                })?;
        let meta = parse_image_filename(filename)?;
        let box_number = fix_box_number(meta.box_number);
        let key = (meta.transect, box_number, meta.year, meta.month, meta.day);

        match meta.kind {
            AreaKind::Oval => {
                if area == 0 {
                    return Err(BoxesError::ZeroTotalArea {
                        transect: meta.transect,
                        box_number,
                    });
                }
                let info = transects.get(meta.transect)?;
                by_key.entry(key).or_default().push(rows.len());
                rows.push(BoxImageRow {
                    site: info.site,
                    transect: meta.transect,
                    box_number,
                    colour: info.colour.clone(),
                    year: meta.year,
                    month: meta.month,
                    day: meta.day,
                    particle_area: 0,
                    total_area: area,
                    area_ratio: 0.0,
                });
            }
            AreaKind::Particles => particles.push((key, area)),
        }
    }

    for (key, area) in particles {
        match by_key.get(&key) {
            Some(indices) => {
                for &i in indices {
                    rows[i].particle_area += area;
                }
            }
            None => orphan_particles += 1,
        }
    }

    for row in &mut rows {
        row.area_ratio = row.particle_area as f64 / row.total_area as f64;
    }
    debug!(
        path = %path.display(),
        n_measurements = rows.len(),
        orphan_particles,
        "image dataset built"
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::transect_register;

    fn write_export(dir: &Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("imagej_output_all.csv");
        std::fs::write(&path, body).expect("write fixture");
        path
    }

    #[test]
    fn particles_summed_per_measurement() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let transects = transect_register();
        let path = write_export(
            dir.path(),
            "tr1_k10_20140728_1_IMG_3_oval.csv,5000\n\
             tr1_k10_20140728_1_IMG_4_particles.csv,120\n\
             tr1_k10_20140728_1_IMG_5_particles.csv,80\n\
             tr2_k11_20140728_1_IMG_6_oval.csv,4000\n",
        );
        let rows = image_dataset(&path, &transects).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].particle_area, 200);
        assert_eq!(rows[0].total_area, 5000);
        assert!((rows[0].area_ratio - 0.04).abs() < 1e-12);
        assert_eq!((rows[0].site, rows[0].colour.as_str()), (1, "white"));
        // The clean box keeps an explicit zero ratio.
        assert_eq!(rows[1].particle_area, 0);
        assert_eq!(rows[1].area_ratio, 0.0);
    }

    #[test]
    fn particles_before_their_oval_still_summed() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let transects = transect_register();
        // Sorted combine output puts IMG_3_particles before IMG_4_oval.
        let path = write_export(
            dir.path(),
            "tr1_k10_20140728_1_IMG_3_particles.csv,120\n\
             tr1_k10_20140728_1_IMG_4_oval.csv,5000\n\
             tr1_k10_20140728_1_IMG_5_particles.csv,80\n",
        );
        let rows = image_dataset(&path, &transects).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].particle_area, 200);
        assert!((rows[0].area_ratio - 0.04).abs() < 1e-12);
    }

    #[test]
    fn particles_keyed_by_box_and_date() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let transects = transect_register();
        let path = write_export(
            dir.path(),
            "tr1_k10_20140728_1_IMG_3_oval.csv,5000\n\
             tr1_k10_20140801_1_IMG_9_particles.csv,75\n",
        );
        // Different date: the particle line is an orphan.
        let rows = image_dataset(&path, &transects).unwrap();
        assert_eq!(rows[0].particle_area, 0);
    }

    #[test]
    fn door_renumbering_unifies_keys() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let transects = transect_register();
        let path = write_export(
            dir.path(),
            "tr1_k75_20140728_1_IMG_3_oval.csv,5000\n\
             tr1_k45_20140728_1_IMG_4_particles.csv,50\n",
        );
        let rows = image_dataset(&path, &transects).unwrap();
        assert_eq!(rows[0].box_number, 45);
        assert_eq!(rows[0].particle_area, 50);
    }

    #[test]
    fn zero_oval_area_is_fatal() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let transects = transect_register();
        let path = write_export(dir.path(), "tr1_k10_20140728_1_IMG_3_oval.csv,0\n");
        let err = image_dataset(&path, &transects).unwrap_err();
        assert!(matches!(err, BoxesError::ZeroTotalArea { .. }));
    }

    #[test]
    fn unregistered_transect_is_fatal() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let transects = transect_register();
        let path = write_export(dir.path(), "tr99_k10_20140728_1_IMG_3_oval.csv,5000\n");
        let err = image_dataset(&path, &transects).unwrap_err();
        assert!(err.to_string().contains("transect 99"));
    }
}
