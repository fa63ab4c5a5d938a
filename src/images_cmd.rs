//! Box-images command: droppings quantification from photographs.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use nox_boxes::{image_dataset, write_box_images};
use nox_reference::Transects;

use crate::cli::BoxImagesArgs;
use crate::config::NoxConfig;

/// Run the droppings-photograph pipeline.
pub fn run(args: BoxImagesArgs) -> Result<()> {
    let _cmd = info_span!("box_images").entered();
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: NoxConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    let transects = Transects::from_path(&config.reference.transects)
        .context("failed to load transect register")?;

    let input = args.input.unwrap_or(config.boxes.images);
    let rows = image_dataset(&input, &transects)
        .with_context(|| format!("failed to build image dataset from {}", input.display()))?;
    info!(n_measurements = rows.len(), "image dataset built");

    let out_path = args.output.unwrap_or(config.boxes.images_output);
    write_box_images(&out_path, &rows)
        .with_context(|| format!("failed to write dataset: {}", out_path.display()))?;
    Ok(())
}
