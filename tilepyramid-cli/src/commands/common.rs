//! Shared flag definitions and config resolution for CLI commands.

use std::path::PathBuf;

use clap::ValueEnum;

use tilepyramid::config::{ConfigFile, TileSetConfig};
use tilepyramid::raster::TileFormat;

use crate::error::CliError;

/// Output format selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    /// JPEG tiles, small and lossy
    Jpeg,
    /// PNG tiles, lossless, supports a transparent fill
    Png,
}

impl From<FormatArg> for TileFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Jpeg => TileFormat::Jpeg,
            FormatArg::Png => TileFormat::Png,
        }
    }
}

/// Tile set flags shared by the generate and plan commands.
///
/// Every flag is optional; unset values fall back to the configuration file
/// and then to the built-in defaults.
#[derive(Debug, Default, clap::Args)]
pub struct TileOptions {
    /// Tile edge size in pixels
    #[arg(long)]
    pub tile_size: Option<u32>,

    /// Lowest zoom level to produce
    #[arg(long)]
    pub zoom_min: Option<u8>,

    /// Highest zoom level to produce
    #[arg(long)]
    pub zoom_max: Option<u8>,

    /// Output format for base images and tiles
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// JPEG quality, 0-100
    #[arg(long)]
    pub quality: Option<u8>,

    /// Fill color for edge padding: white, black, transparent or #rrggbb
    #[arg(long)]
    pub fill_color: Option<String>,

    /// Tile path template with three %d slots for zoom, x and y
    #[arg(long)]
    pub pattern: Option<String>,

    /// Number tile rows top-to-bottom (XYZ) instead of bottom-to-top (TMS)
    #[arg(long)]
    pub xyz: bool,

    /// Rewrite outputs that already exist
    #[arg(long)]
    pub force: bool,

    /// Highest zoom level at which the source may be scaled up (0 disables)
    #[arg(long)]
    pub scaling_up: Option<u8>,

    /// Configuration file to read instead of the per-user default
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Overlay command-line flags on the configuration file and validate.
pub fn resolve_config(args: &TileOptions, file: &ConfigFile) -> Result<TileSetConfig, CliError> {
    let mut builder = file.tile_set_builder();

    if let Some(tile_size) = args.tile_size {
        builder = builder.with_tile_size(tile_size);
    }
    let zoom_min = args.zoom_min.unwrap_or(file.tiles.zoom_min);
    let zoom_max = args.zoom_max.unwrap_or(file.tiles.zoom_max);
    builder = builder.with_zoom_range(zoom_min, zoom_max);
    if let Some(format) = args.format {
        builder = builder.with_format(format.into());
    }
    if let Some(quality) = args.quality {
        builder = builder.with_jpeg_quality(quality);
    }
    if let Some(fill) = &args.fill_color {
        let color = fill
            .parse()
            .map_err(|e| CliError::Config(format!("{e}")))?;
        builder = builder.with_fill_color(color);
    }
    if let Some(pattern) = &args.pattern {
        let pattern = pattern
            .parse()
            .map_err(|e| CliError::Config(format!("{e}")))?;
        builder = builder.with_store_pattern(pattern);
    }
    if args.xyz {
        builder = builder.with_tms(false);
    }
    if args.force {
        builder = builder.with_force(true);
    }
    if let Some(limit) = args.scaling_up {
        builder = builder.with_scaling_up_limit(limit);
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}
