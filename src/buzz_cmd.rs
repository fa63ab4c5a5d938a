//! Feeding-buzz and bout commands, both derived from a fresh ingestion run.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use nox_buzz::{bout_dataset, feeding_buzz_dataset, write_bouts, write_feeding_buzz};

use crate::cli::{BoutsArgs, FeedingBuzzArgs};
use crate::convert;
use crate::sonochiro_cmd::load_and_ingest;

/// Run the feeding-buzz aggregation.
pub fn run_feeding(args: FeedingBuzzArgs) -> Result<()> {
    let _cmd = info_span!("feeding_buzz").entered();
    let (config, references, output) = load_and_ingest(&args.config, &args.inputs)?;

    let mut buzz_config = convert::build_buzz_config(&config.buzz);
    if args.all_species {
        buzz_config = buzz_config.with_final_id(None);
    }
    if let Some(buzz_index) = args.buzz_index {
        buzz_config = buzz_config.with_buzz_index(buzz_index);
    }

    let rows = feeding_buzz_dataset(&output.records, &references.transects, &buzz_config)
        .context("failed to build feeding-buzz dataset")?;
    info!(n_rows = rows.len(), "feeding-buzz dataset built");

    let out_path = args.output.unwrap_or(config.buzz.feeding_output);
    write_feeding_buzz(&out_path, &rows)
        .with_context(|| format!("failed to write dataset: {}", out_path.display()))?;
    Ok(())
}

/// Run the bout annotation.
pub fn run_bouts(args: BoutsArgs) -> Result<()> {
    let _cmd = info_span!("bouts").entered();
    let (config, _references, output) = load_and_ingest(&args.config, &args.inputs)?;

    let mut buzz_config = convert::build_buzz_config(&config.buzz);
    if args.all_species {
        buzz_config = buzz_config.with_final_id(None);
    }
    if let Some(buzz_index) = args.buzz_index {
        buzz_config = buzz_config.with_buzz_index(buzz_index);
    }
    if let Some(gap_seconds) = args.gap_seconds {
        buzz_config = buzz_config.with_gap_seconds(gap_seconds);
    }

    let rows = bout_dataset(&output.records, &buzz_config)
        .context("failed to build bout dataset")?;
    info!(n_rows = rows.len(), "bout dataset built");

    let out_path = args
        .output
        .or(config.buzz.bouts_output)
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "dataset_bout_analysis_with_{}_second_gaps.csv",
                buzz_config.gap_seconds()
            ))
        });
    write_bouts(&out_path, &rows)
        .with_context(|| format!("failed to write dataset: {}", out_path.display()))?;
    Ok(())
}
