//! Bundle loading of all reference tables for one run.

use std::path::PathBuf;

use tracing::info;

use crate::error::ReferenceError;
use crate::nights::NightCalendar;
use crate::sun::SunTable;
use crate::transects::Transects;

/// Locations of the four reference files.
#[derive(Debug, Clone)]
pub struct ReferencePaths {
    /// Transect register (`transects.csv`).
    pub transects: PathBuf,
    /// Sun-data table (`SunData.csv`).
    pub sun_data: PathBuf,
    /// Allowed-nights pairs (`2012-2016_allowednights.csv`).
    pub allowed_nights: PathBuf,
    /// Lamp on/off log (`loglightsoff.csv`).
    pub lights_log: PathBuf,
}

/// All reference tables for one ingestion run, loaded once and held
/// read-only for the duration of the run.
#[derive(Debug, Clone)]
pub struct ReferenceSet {
    /// The transect register.
    pub transects: Transects,
    /// The solar-noon night table.
    pub sun: SunTable,
    /// Allowed-night and lights-off calendars.
    pub nights: NightCalendar,
}

impl ReferenceSet {
    /// Loads every table named in `paths`.
    ///
    /// The sun table is loaded first because lights-off dates resolve
    /// against it.
    ///
    /// # Errors
    ///
    /// Returns the first [`ReferenceError`] encountered; a run without a
    /// complete, consistent reference set cannot produce correct counts.
    pub fn load(paths: &ReferencePaths) -> Result<Self, ReferenceError> {
        let sun = SunTable::from_path(&paths.sun_data)?;
        let nights = NightCalendar::from_paths(&paths.allowed_nights, &paths.lights_log, &sun)?;
        let transects = Transects::from_path(&paths.transects)?;
        info!(
            n_transects = transects.len(),
            n_nights = sun.len(),
            "reference tables loaded"
        );
        Ok(Self {
            transects,
            sun,
            nights,
        })
    }
}
