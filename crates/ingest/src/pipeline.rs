//! The per-line state machine and file orchestration.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use nox_filename::{extract_deployment, extract_time, is_valid_filename};
use nox_reference::ReferenceSet;

use crate::error::IngestError;
use crate::record::{IngestOutput, NormalizedRecord, SkipReason, SkipRecord};

/// First field of a classifier header line.
pub const HEADER_SENTINEL: &str = "Directory";

/// Number of delimited fields in a classifier output line.
const LINE_FIELDS: usize = 23;

/// Field offsets within a classifier output line.
const FIELD_FILENAME: usize = 1;
const FIELD_CLASSIFICATION: std::ops::Range<usize> = 2..8;
const FIELD_METRICS: std::ops::Range<usize> = 17..23;

/// Ingests one or more classifier output files against a loaded reference
/// set.
///
/// Files are processed in the given order and their results concatenated,
/// so a run is reproducible for a fixed file list. Returns the complete
/// [`IngestOutput`]; any fatal error aborts the whole run.
///
/// # Errors
///
/// Returns [`IngestError`] on I/O failure or on the first fatal line (see
/// [`ingest_reader`]).
pub fn ingest_files<P: AsRef<Path>>(
    paths: &[P],
    references: &ReferenceSet,
) -> Result<IngestOutput, IngestError> {
    let mut output = IngestOutput::default();
    for path in paths {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let origin = path.display().to_string();
        debug!(path = %origin, "ingesting classifier output");
        ingest_reader(BufReader::new(file), &origin, references, &mut output)?;
    }
    info!(
        total = output.total_lines(),
        included = output.records.len(),
        skipped = output.skipped.len(),
        excluded = output.excluded,
        "ingestion complete"
    );
    Ok(output)
}

/// Runs the per-line state machine over one source, appending to `output`.
///
/// Per line: validate the filename (skip on failure), extract timestamp and
/// deployment, resolve the night index, join site and colour through the
/// transect register, apply the allowed-night and lights-off policy
/// (excluded counts bump on failure), and emit a [`NormalizedRecord`]
/// otherwise.
///
/// # Errors
///
/// Returns [`IngestError`] on I/O failure, on a malformed field layout, on
/// numeric coercion failure, or on any reference lookup miss. No recovery
/// is attempted: those conditions mean the input format or the reference
/// tables changed.
pub fn ingest_reader<R: BufRead>(
    reader: R,
    origin: &str,
    references: &ReferenceSet,
    output: &mut IngestOutput,
) -> Result<(), IngestError> {
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| IngestError::Io {
            path: origin.into(),
            source,
        })?;
        let row = idx + 1;
        let fields: Vec<&str> = line.trim().split(',').collect();

        let filename = *fields.get(FIELD_FILENAME).ok_or_else(|| {
            IngestError::MalformedLine {
                origin: origin.to_string(),
                line: row,
                details: format!("expected at least 2 fields, got {}", fields.len()),
            }
        })?;

        // Received -> Skipped. The validity gate also rejects headers.
        if !is_valid_filename(filename) {
            let reason = if fields[0] == HEADER_SENTINEL {
                SkipReason::Header
            } else {
                SkipReason::InvalidFilename(filename.to_string())
            };
            output.skipped.push(SkipRecord {
                origin: origin.to_string(),
                line: row,
                reason,
            });
            continue;
        }

        if fields.len() < LINE_FIELDS {
            return Err(IngestError::MalformedLine {
                origin: origin.to_string(),
                line: row,
                details: format!("expected {LINE_FIELDS} fields, got {}", fields.len()),
            });
        }

        // Received -> Parsed.
        let time = extract_time(filename)?;
        let total_time_sec = time.epoch_seconds();
        let night = references.sun.resolve_night(total_time_sec)?;
        let deployment = extract_deployment(filename)?;
        let transect_info = references.transects.get(deployment.transect)?;
        let site = transect_info.site;

        // Parsed -> Excluded. The lights-off calendar is only consulted for
        // allowed nights, so a site absent from it cannot fail a run whose
        // records were all disallowed anyway.
        if !references.nights.is_allowed(site, night)? {
            output.excluded += 1;
            continue;
        }
        if references.nights.is_lights_off(site, night)? {
            output.excluded += 1;
            continue;
        }

        // Parsed -> Included.
        let class = &fields[FIELD_CLASSIFICATION];
        let metric = |offset: usize, name: &'static str| -> Result<i64, IngestError> {
            let value = fields[FIELD_METRICS][offset];
            value.trim().parse().map_err(|_| IngestError::Numeric {
                origin: origin.to_string(),
                line: row,
                field: name,
                value: value.to_string(),
            })
        };
        let index = |offset: usize, name: &'static str| -> Result<i64, IngestError> {
            class[offset].trim().parse().map_err(|_| IngestError::Numeric {
                origin: origin.to_string(),
                line: row,
                field: name,
                value: class[offset].to_string(),
            })
        };

        output.records.push(NormalizedRecord {
            filename: filename.to_string(),
            transect: deployment.transect,
            site,
            colour: transect_info.colour.clone(),
            night,
            total_time_sec,
            detector: deployment.detector,
            comp_fl: deployment.card,
            final_id: class[0].to_string(),
            contact: class[1].to_string(),
            group: class[2].to_string(),
            group_index: index(3, "group_index")?,
            species: class[4].to_string(),
            species_index: index(5, "species_index")?,
            nb_calls: metric(0, "nb_calls")?,
            med_freq: metric(1, "med_freq")?,
            med_int: metric(2, "med_int")?,
            i_qual: metric(3, "i_qual")?,
            i_sc: metric(4, "i_sc")?,
            i_buzz: metric(5, "i_buzz")?,
        });
    }
    Ok(())
}
