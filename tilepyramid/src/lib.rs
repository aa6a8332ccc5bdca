//! TilePyramid - slippy-map tile pyramids from single raster images
//!
//! This library turns one large raster image into the `zoom/x/y` tree of
//! fixed-size tiles consumed by slippy-map viewers. For every zoom level
//! that the source resolution supports, it produces a scaled base image and
//! cuts it into tiles, padding the edges and honoring the TMS row
//! convention.
//!
//! # Example
//!
//! ```no_run
//! use tilepyramid::config::TileSetConfig;
//! use tilepyramid::pyramid::{RunOptions, TilePyramid};
//! use std::path::Path;
//!
//! let config = TileSetConfig::builder()
//!     .with_zoom_range(0, 6)
//!     .build()?;
//!
//! let summary = TilePyramid::new(config).run(
//!     Path::new("world.png"),
//!     Path::new("tiles"),
//!     &RunOptions::default(),
//! )?;
//! println!(
//!     "zoom {:?}..={:?}, {} tiles",
//!     summary.realized_min, summary.realized_max, summary.tiles_written
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod events;
pub mod grid;
pub mod logging;
pub mod planner;
pub mod pyramid;
pub mod raster;

pub use config::{ConfigError, StorePattern, TileSetConfig, TileSetConfigBuilder};
pub use events::{EventSink, NullEventSink, RunEvent, TracingEventSink};
pub use grid::{CropRect, Tile, TileCoordinate, TileGrid};
pub use planner::{plan_zoom_levels, ZoomLevelPlan, ZoomPlan};
pub use pyramid::{PyramidError, RunOptions, RunSummary, TilePyramid};
pub use raster::{FillColor, ImageEngine, Raster, RasterEngine, TileFormat};
