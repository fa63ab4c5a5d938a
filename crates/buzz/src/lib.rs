//! # nox-buzz
//!
//! Feeding-buzz and activity-bout datasets derived from the normalized
//! detector dataset.
//!
//! The feeding-buzz dataset counts, per transect per night, how many
//! recordings were made and how many of them carried a feeding buzz. The
//! bout dataset re-emits every recording annotated with the seconds since
//! the last silence gap at its transect, the raw material for bout-length
//! analyses. Both default to the common pipistrelle (`PippiT`), the focal
//! species of the survey.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `config` | Shared knobs: species filter, buzz threshold, gap width |
//! | `feeding` | Per-transect, per-night feeding-buzz counts |
//! | `bouts` | Time-since-gap annotation per recording |
//! | `writer` | Delimited-text output |
//! | `error` | Error types |

mod bouts;
mod config;
mod error;
mod feeding;
mod writer;

pub use bouts::{BoutRow, bout_dataset};
pub use config::BuzzConfig;
pub use error::BuzzError;
pub use feeding::{FeedingBuzzRow, feeding_buzz_dataset};
pub use writer::{write_bouts, write_feeding_buzz};

#[cfg(test)]
pub(crate) mod test_support {
    use nox_ingest::NormalizedRecord;
    use nox_reference::Transects;

    /// Three transects over two sites: 1 and 2 at site 1, 3 at site 2.
    pub(crate) fn transect_register() -> Transects {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("transects.csv");
        std::fs::write(
            &path,
            "1,1,leusden white,white,2012-4-1\n\
             2,1,leusden red,red,2012-4-1\n\
             3,2,voorst green,green,2012-4-1\n",
        )
        .expect("write fixture");
        Transects::from_path(&path).expect("fixture register loads")
    }

    /// A plausible record with the given placement, timestamp, and buzz
    /// index; everything else is a fixed common-pipistrelle template.
    pub(crate) fn record(
        transect: u32,
        site: u32,
        night: usize,
        total_time_sec: i64,
        i_buzz: i64,
    ) -> NormalizedRecord {
        NormalizedRecord {
            filename: format!("tr{transect}_d1_cf1_{total_time_sec}.wav"),
            transect,
            site,
            colour: "white".to_string(),
            night,
            total_time_sec,
            detector: 1,
            comp_fl: "1".to_string(),
            final_id: "PippiT".to_string(),
            contact: "1".to_string(),
            group: "Pip".to_string(),
            group_index: 9,
            species: "PippiT".to_string(),
            species_index: 8,
            nb_calls: 14,
            med_freq: 46,
            med_int: 80,
            i_qual: 5,
            i_sc: 7,
            i_buzz,
        }
    }
}
