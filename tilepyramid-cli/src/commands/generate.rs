//! Generate command - build the whole tile pyramid.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use console::style;

use tilepyramid::config::ConfigFile;
use tilepyramid::events::{EventSink, NullEventSink};
use tilepyramid::logging::init_logging;
use tilepyramid::pyramid::{RunOptions, TilePyramid};

use super::common::{resolve_config, TileOptions};
use crate::error::CliError;
use crate::progress::ProgressSink;

/// Arguments for the generate command.
#[derive(Debug, clap::Args)]
pub struct GenerateArgs {
    /// Source raster image
    pub source: PathBuf,

    /// Output directory for the tile tree
    pub output: PathBuf,

    #[command(flatten)]
    pub tiles: TileOptions,

    /// Remove the per-zoom base images after tiling
    #[arg(long)]
    pub clean_up: bool,

    /// Write the tiles of each zoom level on a worker pool
    #[arg(long)]
    pub parallel: bool,

    /// Suppress progress output
    #[arg(long, short)]
    pub quiet: bool,

    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Run the generate command.
pub fn run(args: GenerateArgs) -> Result<(), CliError> {
    let _logging = init_logging(args.log_file.as_deref())?;
    tracing::info!(
        source = %args.source.display(),
        output = %args.output.display(),
        "generating tile pyramid"
    );

    let file = ConfigFile::load_or_default(args.tiles.config.as_deref())?;
    let config = resolve_config(&args.tiles, &file)?;

    // Let ctrl-c stop the run between tiles instead of killing the process.
    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || {
            cancel.store(true, Ordering::SeqCst);
        })
        .map_err(|e| CliError::Signal(e.to_string()))?;
    }

    let events: Arc<dyn EventSink> = if args.quiet {
        Arc::new(NullEventSink)
    } else {
        Arc::new(ProgressSink::new())
    };
    let options = RunOptions {
        clean_up: args.clean_up || file.run.clean_up,
        parallel: args.parallel || file.run.parallel,
        cancel: Some(cancel),
    };

    let pyramid = TilePyramid::new(config).with_events(events);
    let summary = pyramid.run(&args.source, &args.output, &options)?;

    if !args.quiet {
        match (summary.realized_min, summary.realized_max) {
            (Some(min), Some(max)) => {
                println!(
                    "{} zoom {min}..={max}: {} base images, {} tiles written, {} skipped",
                    style("done").green().bold(),
                    summary.base_images_built,
                    summary.tiles_written,
                    summary.tiles_skipped,
                );
                if summary.base_images_removed > 0 {
                    println!("  removed {} base images", summary.base_images_removed);
                }
            }
            _ => {
                println!(
                    "{} the source is too small for the requested zoom range; nothing to do",
                    style("done").green().bold(),
                );
            }
        }
    }
    Ok(())
}
