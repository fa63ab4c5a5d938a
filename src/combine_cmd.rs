//! Combine command: concatenate per-card export files.
//!
//! Detectors and the image-analysis tool both emit one small CSV per
//! flash card or photograph; every downstream pipeline reads a single
//! combined file. Detector exports are concatenated verbatim. Image
//! exports drop their per-file headers and keep only the area column,
//! prefixed with the source filename that carries the measurement
//! metadata.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use crate::cli::CombineArgs;

/// Header line of a single image-analysis export.
const IMAGE_HEADER: &str = " ,Area,Mean,Min,Max";

/// Run the combine step.
pub fn run(args: CombineArgs) -> Result<()> {
    let _cmd = info_span!("combine").entered();
    let files = csv_files(&args)?;
    if files.is_empty() {
        bail!("no CSV files to combine in {}", args.dir.display());
    }
    info!(n_files = files.len(), dir = %args.dir.display(), "combining export files");

    let out = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    let mut writer = BufWriter::new(out);

    for path in &files {
        let file = File::open(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("non-UTF-8 filename: {}", path.display()))?;
        for line in BufReader::new(file).lines() {
            let line = line.with_context(|| format!("failed to read {}", path.display()))?;
            if args.images {
                if line == IMAGE_HEADER {
                    continue;
                }
                let area = line.split(',').nth(1).with_context(|| {
                    format!("{name}: no area column in line {line:?}")
                })?;
                writeln!(writer, "{name},{area}")?;
            } else {
                writeln!(writer, "{line}")?;
            }
        }
    }
    writer.flush().context("failed to flush combined file")?;
    info!(path = %args.output.display(), "combined file written");
    Ok(())
}

/// All `.csv` files in the target directory except the output file itself,
/// sorted by name so a combine run is reproducible.
fn csv_files(args: &CombineArgs) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(&args.dir)
        .with_context(|| format!("failed to read directory: {}", args.dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to read directory: {}", args.dir.display()))?
            .path();
        if path.extension().is_none_or(|ext| ext != "csv") {
            continue;
        }
        if path.file_name() == args.output.file_name() {
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}
