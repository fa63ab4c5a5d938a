//! Boxes command: the three inspection-log datasets in one run.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use nox_boxes::{
    body_measurement_dataset, load_box_survey, occupancy_dataset, sex_count_dataset,
    write_body_measurements, write_occupancy, write_sex_counts,
};
use nox_reference::Transects;

use crate::cli::BoxesArgs;
use crate::config::NoxConfig;

/// Run the bat-box inspection pipeline.
pub fn run(args: BoxesArgs) -> Result<()> {
    let _cmd = info_span!("boxes").entered();
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: NoxConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    let transects = Transects::from_path(&config.reference.transects)
        .context("failed to load transect register")?;

    let input = args.input.unwrap_or(config.boxes.survey);
    let observations =
        load_box_survey(&input, &transects).context("failed to load inspection log")?;
    info!(n_observations = observations.len(), "inspection log loaded");

    let occupancy = occupancy_dataset(&observations);
    write_occupancy(&config.boxes.occupancy_output, &occupancy).with_context(|| {
        format!(
            "failed to write dataset: {}",
            config.boxes.occupancy_output.display()
        )
    })?;

    let measurements = body_measurement_dataset(&observations);
    write_body_measurements(&config.boxes.measurements_output, &measurements).with_context(
        || {
            format!(
                "failed to write dataset: {}",
                config.boxes.measurements_output.display()
            )
        },
    )?;

    let sex_counts = sex_count_dataset(&observations);
    write_sex_counts(&config.boxes.sex_counts_output, &sex_counts).with_context(|| {
        format!(
            "failed to write dataset: {}",
            config.boxes.sex_counts_output.display()
        )
    })?;
    Ok(())
}
