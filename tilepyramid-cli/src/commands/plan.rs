//! Plan command - dry-run the zoom planner.

use std::path::PathBuf;

use console::style;

use tilepyramid::config::ConfigFile;
use tilepyramid::pyramid::TilePyramid;

use super::common::{resolve_config, TileOptions};
use crate::error::CliError;

/// Arguments for the plan command.
#[derive(Debug, clap::Args)]
pub struct PlanArgs {
    /// Source raster image
    pub source: PathBuf,

    /// Output directory the run would write to (probed for existing levels)
    pub output: PathBuf,

    #[command(flatten)]
    pub tiles: TileOptions,
}

/// Run the plan command.
pub fn run(args: PlanArgs) -> Result<(), CliError> {
    let file = ConfigFile::load_or_default(args.tiles.config.as_deref())?;
    let config = resolve_config(&args.tiles, &file)?;
    let tile_size = config.tile_size();

    let pyramid = TilePyramid::new(config);
    let plan = pyramid.plan(&args.source, &args.output)?;

    if plan.is_empty() {
        println!(
            "source too small: every level of zoom {}..={} needs more than the source provides",
            plan.requested_min(),
            plan.requested_max()
        );
        return Ok(());
    }

    println!(
        "zoom {}..={} (requested {}..={}), {} pixel tiles",
        plan.realized_min().unwrap_or_default(),
        plan.realized_max().unwrap_or_default(),
        plan.requested_min(),
        plan.requested_max(),
        tile_size,
    );
    for level in plan.levels().iter().rev() {
        let status = if level.skip {
            style("exists, will skip").dim()
        } else {
            style("will build").green()
        };
        println!(
            "  zoom {:>2}: up to {}x{}  {}",
            level.zoom, level.target_width, level.target_height, status
        );
    }
    for zoom in plan.clamped_out().iter().rev() {
        println!(
            "  zoom {:>2}: {}",
            zoom,
            style("dropped, exceeds source resolution").yellow()
        );
    }
    Ok(())
}
