//! Transect register: transect id -> site, name, colour.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::ReferenceError;

/// Everything the register knows about one transect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransectInfo {
    /// Numeric site id the transect belongs to.
    pub site: u32,
    /// Free-text transect name.
    pub name: String,
    /// Experimental lamp colour of the transect.
    pub colour: String,
}

/// The transect register, loaded once per run and shared read-only.
///
/// Rows are `transect,site,name,colour,start_date`; the trailing start date
/// is carried by the file for field logistics and ignored here.
#[derive(Debug, Clone, Default)]
pub struct Transects {
    map: BTreeMap<u32, TransectInfo>,
}

impl Transects {
    /// Loads the register from a comma-delimited file.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::Io`] if the file cannot be read and
    /// [`ReferenceError::MalformedRow`] for rows with missing or
    /// non-numeric key fields.
    pub fn from_path(path: &Path) -> Result<Self, ReferenceError> {
        let file = File::open(path).map_err(|source| ReferenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(BufReader::new(file), path)?;
        debug!(path = %path.display(), n_transects = table.len(), "transect register loaded");
        Ok(table)
    }

    pub(crate) fn parse<R: BufRead>(reader: R, path: &Path) -> Result<Self, ReferenceError> {
        let mut map = BTreeMap::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| ReferenceError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let row = idx + 1;
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() < 4 {
                return Err(ReferenceError::MalformedRow {
                    path: path.to_path_buf(),
                    line: row,
                    details: format!("expected at least 4 fields, got {}", fields.len()),
                });
            }
            let transect = parse_u32(fields[0], "transect", path, row)?;
            let site = parse_u32(fields[1], "site", path, row)?;
            map.insert(
                transect,
                TransectInfo {
                    site,
                    name: fields[2].to_string(),
                    colour: fields[3].trim_end().to_string(),
                },
            );
        }
        Ok(Self { map })
    }

    /// Looks up a transect; absence is a fatal reference mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::UnknownTransect`] if `transect` is not in
    /// the register.
    pub fn get(&self, transect: u32) -> Result<&TransectInfo, ReferenceError> {
        self.map
            .get(&transect)
            .ok_or(ReferenceError::UnknownTransect { transect })
    }

    /// Iterates over `(transect, info)` in ascending transect order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &TransectInfo)> {
        self.map.iter().map(|(&t, info)| (t, info))
    }

    /// Number of transects in the register.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the register is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

fn parse_u32(
    field: &str,
    name: &str,
    path: &Path,
    line: usize,
) -> Result<u32, ReferenceError> {
    field
        .trim()
        .parse()
        .map_err(|_| ReferenceError::MalformedRow {
            path: path.to_path_buf(),
            line,
            details: format!("{name} is not an integer: {field:?}"),
        })
}
