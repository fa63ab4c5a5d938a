mod boxes_cmd;
mod buzz_cmd;
mod cli;
mod combine_cmd;
mod config;
mod convert;
mod images_cmd;
mod logging;
mod sonochiro_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Sonochiro(args) => sonochiro_cmd::run(args),
        Command::FeedingBuzz(args) => buzz_cmd::run_feeding(args),
        Command::Bouts(args) => buzz_cmd::run_bouts(args),
        Command::Boxes(args) => boxes_cmd::run(args),
        Command::BoxImages(args) => images_cmd::run(args),
        Command::Combine(args) => combine_cmd::run(args),
    }
}
