use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Nox field-survey dataset builder.
#[derive(Parser)]
#[command(
    name = "nox",
    version,
    about = "Night-survey dataset builder for the Light on Nature field experiment"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Build the normalized detector dataset from classifier output.
    Sonochiro(SonochiroArgs),
    /// Count feeding buzzes per transect per night.
    FeedingBuzz(FeedingBuzzArgs),
    /// Annotate recordings with time since the last activity gap.
    Bouts(BoutsArgs),
    /// Build the bat-box inspection datasets.
    Boxes(BoxesArgs),
    /// Quantify droppings from bat-box photographs.
    BoxImages(BoxImagesArgs),
    /// Concatenate per-card export files into one combined file.
    Combine(CombineArgs),
}

/// Arguments for the `sonochiro` subcommand.
#[derive(clap::Args)]
pub struct SonochiroArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "nox.toml")]
    pub config: PathBuf,

    /// Classifier output files; overrides [sonochiro].inputs from config.
    pub inputs: Vec<PathBuf>,

    /// Override output CSV path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the skipped-line audit list to this path.
    #[arg(long)]
    pub skips: Option<PathBuf>,
}

/// Arguments for the `feeding-buzz` subcommand.
#[derive(clap::Args)]
pub struct FeedingBuzzArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "nox.toml")]
    pub config: PathBuf,

    /// Classifier output files; overrides [sonochiro].inputs from config.
    pub inputs: Vec<PathBuf>,

    /// Override output CSV path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the minimum feeding-buzz index from config.
    #[arg(long = "buzz-index")]
    pub buzz_index: Option<i64>,

    /// Keep all species instead of the configured focal species.
    #[arg(long)]
    pub all_species: bool,
}

/// Arguments for the `bouts` subcommand.
#[derive(clap::Args)]
pub struct BoutsArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "nox.toml")]
    pub config: PathBuf,

    /// Classifier output files; overrides [sonochiro].inputs from config.
    pub inputs: Vec<PathBuf>,

    /// Override output CSV path; defaults to a name derived from the gap
    /// width.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the bout-separating gap width in seconds from config.
    #[arg(long = "gap-seconds")]
    pub gap_seconds: Option<i64>,

    /// Override the minimum feeding-buzz index from config.
    #[arg(long = "buzz-index")]
    pub buzz_index: Option<i64>,

    /// Keep all species instead of the configured focal species.
    #[arg(long)]
    pub all_species: bool,
}

/// Arguments for the `boxes` subcommand.
#[derive(clap::Args)]
pub struct BoxesArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "nox.toml")]
    pub config: PathBuf,

    /// Inspection log; overrides [boxes].survey from config.
    pub input: Option<PathBuf>,
}

/// Arguments for the `box-images` subcommand.
#[derive(clap::Args)]
pub struct BoxImagesArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "nox.toml")]
    pub config: PathBuf,

    /// Combined image-analysis export; overrides [boxes].images from config.
    pub input: Option<PathBuf>,

    /// Override output CSV path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `combine` subcommand.
#[derive(clap::Args)]
pub struct CombineArgs {
    /// Directory holding the per-card CSV export files.
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Path for the combined output file.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Treat the files as image-analysis exports: drop their headers and
    /// keep only the filename and area columns.
    #[arg(long)]
    pub images: bool,
}
