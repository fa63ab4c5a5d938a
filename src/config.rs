use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Nox configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct NoxConfig {
    /// Reference-file locations.
    #[serde(default)]
    pub reference: ReferenceToml,

    /// Detector-ingestion settings.
    #[serde(default)]
    pub sonochiro: SonochiroToml,

    /// Feeding-buzz and bout settings.
    #[serde(default)]
    pub buzz: BuzzToml,

    /// Bat-box settings.
    #[serde(default)]
    pub boxes: BoxesToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceToml {
    #[serde(default = "default_transects")]
    pub transects: PathBuf,
    #[serde(default = "default_sun_data")]
    pub sun_data: PathBuf,
    #[serde(default = "default_allowed_nights")]
    pub allowed_nights: PathBuf,
    #[serde(default = "default_lights_log")]
    pub lights_log: PathBuf,
}

impl Default for ReferenceToml {
    fn default() -> Self {
        Self {
            transects: default_transects(),
            sun_data: default_sun_data(),
            allowed_nights: default_allowed_nights(),
            lights_log: default_lights_log(),
        }
    }
}

fn default_transects() -> PathBuf {
    PathBuf::from("transects.csv")
}
fn default_sun_data() -> PathBuf {
    PathBuf::from("SunData.csv")
}
fn default_allowed_nights() -> PathBuf {
    PathBuf::from("2012-2016_allowednights.csv")
}
fn default_lights_log() -> PathBuf {
    PathBuf::from("loglightsoff.csv")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SonochiroToml {
    /// Classifier output files to ingest, in order.
    #[serde(default)]
    pub inputs: Vec<PathBuf>,
    #[serde(default = "default_sonochiro_output")]
    pub output: PathBuf,
}

impl Default for SonochiroToml {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: default_sonochiro_output(),
        }
    }
}

fn default_sonochiro_output() -> PathBuf {
    PathBuf::from("dataset_sonochiro.csv")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuzzToml {
    /// Focal species; an empty string keeps every species.
    #[serde(default = "default_final_id")]
    pub final_id: String,
    #[serde(default = "default_buzz_index")]
    pub buzz_index: i64,
    #[serde(default = "default_gap_seconds")]
    pub gap_seconds: i64,
    #[serde(default = "default_feeding_output")]
    pub feeding_output: PathBuf,
    /// Bout output path; when unset the name is derived from the gap width.
    #[serde(default)]
    pub bouts_output: Option<PathBuf>,
}

impl Default for BuzzToml {
    fn default() -> Self {
        Self {
            final_id: default_final_id(),
            buzz_index: default_buzz_index(),
            gap_seconds: default_gap_seconds(),
            feeding_output: default_feeding_output(),
            bouts_output: None,
        }
    }
}

fn default_final_id() -> String {
    "PippiT".to_string()
}
fn default_buzz_index() -> i64 {
    2
}
fn default_gap_seconds() -> i64 {
    30
}
fn default_feeding_output() -> PathBuf {
    PathBuf::from("dataset_sonochiro_feeding_buzz.csv")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoxesToml {
    #[serde(default = "default_survey")]
    pub survey: PathBuf,
    #[serde(default = "default_occupancy_output")]
    pub occupancy_output: PathBuf,
    #[serde(default = "default_measurements_output")]
    pub measurements_output: PathBuf,
    #[serde(default = "default_sex_counts_output")]
    pub sex_counts_output: PathBuf,
    #[serde(default = "default_images")]
    pub images: PathBuf,
    #[serde(default = "default_images_output")]
    pub images_output: PathBuf,
}

impl Default for BoxesToml {
    fn default() -> Self {
        Self {
            survey: default_survey(),
            occupancy_output: default_occupancy_output(),
            measurements_output: default_measurements_output(),
            sex_counts_output: default_sex_counts_output(),
            images: default_images(),
            images_output: default_images_output(),
        }
    }
}

fn default_survey() -> PathBuf {
    PathBuf::from("bats_in_bat_boxes.csv")
}
fn default_occupancy_output() -> PathBuf {
    PathBuf::from("dataset_bats_in_bat_boxes.csv")
}
fn default_measurements_output() -> PathBuf {
    PathBuf::from("dataset_bat_body_measurements.csv")
}
fn default_sex_counts_output() -> PathBuf {
    PathBuf::from("dataset_bats_sex_counted.csv")
}
fn default_images() -> PathBuf {
    PathBuf::from("imagej_output_all.csv")
}
fn default_images_output() -> PathBuf {
    PathBuf::from("dataset_imagej.csv")
}
