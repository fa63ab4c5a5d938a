//! Sonochiro command: build the normalized detector dataset.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use nox_ingest::{IngestOutput, ingest_files, write_records, write_skips};
use nox_reference::ReferenceSet;

use crate::cli::SonochiroArgs;
use crate::config::NoxConfig;
use crate::convert;

/// Run the detector ingestion pipeline and write the dataset.
pub fn run(args: SonochiroArgs) -> Result<()> {
    let _cmd = info_span!("sonochiro").entered();
    let (config, _references, output) = load_and_ingest(&args.config, &args.inputs)?;

    let out_path = args.output.unwrap_or(config.sonochiro.output);
    write_records(&out_path, &output.records)
        .with_context(|| format!("failed to write dataset: {}", out_path.display()))?;

    if let Some(skips_path) = args.skips {
        write_skips(&skips_path, &output.skipped)
            .with_context(|| format!("failed to write skip list: {}", skips_path.display()))?;
    }
    Ok(())
}

/// Shared front half of every detector-derived command: load the project
/// TOML, load the reference tables, and ingest the classifier files.
///
/// CLI inputs take precedence over `[sonochiro].inputs` from the config.
pub fn load_and_ingest(
    config_path: &Path,
    cli_inputs: &[PathBuf],
) -> Result<(NoxConfig, ReferenceSet, IngestOutput)> {
    let toml_str = std::fs::read_to_string(config_path)
        .with_context(|| format!("failed to read config file: {}", config_path.display()))?;
    let config: NoxConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    let paths = convert::build_reference_paths(&config.reference);
    let references = ReferenceSet::load(&paths).context("failed to load reference tables")?;

    let inputs: &[PathBuf] = if cli_inputs.is_empty() {
        &config.sonochiro.inputs
    } else {
        cli_inputs
    };
    if inputs.is_empty() {
        bail!("no classifier files: set [sonochiro].inputs in config or pass them as arguments");
    }

    info!(n_files = inputs.len(), "ingesting classifier output");
    let output = ingest_files(inputs, &references).context("ingestion failed")?;
    Ok((config, references, output))
}
