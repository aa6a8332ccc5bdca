//! TilePyramid CLI - command-line interface
//!
//! Turns one large raster image into a slippy-map tile pyramid on disk.

mod commands;
mod error;
mod progress;

use clap::{Parser, Subcommand};

use crate::error::CliError;

#[derive(Debug, Parser)]
#[command(
    name = "tilepyramid",
    version,
    about = "Slice one large raster image into a slippy-map tile pyramid"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate the tile pyramid
    Generate(commands::generate::GenerateArgs),
    /// Show which zoom levels a run would produce, without writing anything
    Plan(commands::plan::PlanArgs),
}

fn main() {
    let cli = Cli::parse();
    let result: Result<(), CliError> = match cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Plan(args) => commands::plan::run(args),
    };

    if let Err(error) = result {
        eprintln!("error: {error}");
        let mut source = std::error::Error::source(&error);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}
