//! Output record, skip record, and run accounting.

use serde::Serialize;

/// Output column names, in order. Kept in sync with
/// [`NormalizedRecord`]'s field order; the writer tests assert the match.
pub const COLUMNS: [&str; 20] = [
    "filename",
    "transect",
    "site",
    "colour",
    "night",
    "total_time_sec",
    "detector",
    "comp_fl",
    "final_id",
    "contact",
    "group",
    "group_index",
    "species",
    "species_index",
    "nb_calls",
    "med_freq",
    "med_int",
    "i_qual",
    "i_sc",
    "i_buzz",
];

/// One fully normalized detector recording, the unit of every downstream
/// dataset.
///
/// Field names double as the output column names, in declaration order.
/// Invariant: `night` is a valid index into the run's sun table, is in the
/// allowed-night set of `site`, and is not in the lights-off set of `site`
/// — violating records are excluded before construction, never repaired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    /// Original recording filename.
    pub filename: String,
    /// Survey transect number.
    pub transect: u32,
    /// Numeric site id, joined via the transect register.
    pub site: u32,
    /// Experimental lamp colour of the transect.
    pub colour: String,
    /// Night index into the sun table.
    pub night: usize,
    /// Recording timestamp in seconds since the survey epoch.
    pub total_time_sec: i64,
    /// Detector unit number.
    pub detector: u32,
    /// Compact-flash card identifier.
    pub comp_fl: String,
    /// Final classifier identification label.
    pub final_id: String,
    /// Contact flag as emitted by the classifier.
    pub contact: String,
    /// Taxonomic group label.
    pub group: String,
    /// Classifier confidence index for the group.
    pub group_index: i64,
    /// Species label.
    pub species: String,
    /// Classifier confidence index for the species.
    pub species_index: i64,
    /// Number of calls in the recording.
    pub nb_calls: i64,
    /// Median call frequency.
    pub med_freq: i64,
    /// Median call intensity.
    pub med_int: i64,
    /// Acoustic quality index.
    pub i_qual: i64,
    /// Species-confidence quality index.
    pub i_sc: i64,
    /// Feeding-buzz index.
    pub i_buzz: i64,
}

/// Why a line was skipped rather than parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The line was a classifier header (first field matched the sentinel).
    Header,
    /// The filename matched neither naming convention (or belonged to the
    /// corrupted rename batch).
    InvalidFilename(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Header => f.write_str("Header"),
            SkipReason::InvalidFilename(name) => f.write_str(name),
        }
    }
}

/// One skipped input line, kept for manual audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipRecord {
    /// Source file the line came from.
    pub origin: String,
    /// 1-based line number within that file.
    pub line: usize,
    /// Why the line was skipped.
    pub reason: SkipReason,
}

/// The complete result of one ingestion run.
///
/// Accounting invariant: `records.len() + skipped.len() + excluded` equals
/// the number of input lines processed.
#[derive(Debug, Default)]
pub struct IngestOutput {
    /// Included records, in input encounter order.
    pub records: Vec<NormalizedRecord>,
    /// Skipped lines, in input encounter order.
    pub skipped: Vec<SkipRecord>,
    /// Count of structurally valid records excluded by the
    /// allowed-night/lights-off policy. Aggregate only; no per-record
    /// detail is retained.
    pub excluded: u64,
}

impl IngestOutput {
    /// Total number of input lines this output accounts for.
    pub fn total_lines(&self) -> u64 {
        self.records.len() as u64 + self.skipped.len() as u64 + self.excluded
    }
}
