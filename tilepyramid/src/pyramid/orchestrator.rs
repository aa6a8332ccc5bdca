//! Run orchestration.
//!
//! Sequences a whole pyramid run: plan the zoom range, build the base
//! images top-down, tile each realized level bottom-up, optionally remove
//! the base images afterwards. The first error from any stage aborts the
//! run; a rerun with `force` off resumes from whatever exists on disk.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::config::TileSetConfig;
use crate::events::{EventSink, NullEventSink, RunEvent};
use crate::grid::{Tile, TileGrid};
use crate::planner::{plan_zoom_levels, ZoomPlan};
use crate::raster::{ImageEngine, RasterEngine, TileFormat};

use super::base::{base_image_path, BaseImageBuilder};
use super::writer::{TileOutcome, TileWriter};
use super::PyramidError;

/// Per-run behavior switches, separate from the tile set parameters.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Remove the per-zoom base images once tiling is done.
    pub clean_up: bool,
    /// Write the tiles of each zoom level on a rayon worker pool. Base
    /// images always build sequentially; each one is the scale source for
    /// the next.
    pub parallel: bool,
    /// Cooperative cancel flag, checked between tiles and between levels.
    pub cancel: Option<Arc<AtomicBool>>,
}

/// What a completed run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Lowest realized zoom level, `None` when everything clamped out.
    pub realized_min: Option<u8>,
    /// Highest realized zoom level.
    pub realized_max: Option<u8>,
    /// Base images written this run (skipped levels not counted).
    pub base_images_built: usize,
    /// Tile files written this run.
    pub tiles_written: usize,
    /// Tiles skipped because their file already existed.
    pub tiles_skipped: usize,
    /// Base images deleted by cleanup.
    pub base_images_removed: usize,
}

/// Progression of a run, used for trace output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Planning,
    BuildingBaseImages,
    TilingZoomLevel(u8),
    CleaningUp,
    Done,
}

/// Generates a complete tile pyramid from one source raster.
///
/// # Example
///
/// ```no_run
/// use tilepyramid::config::TileSetConfig;
/// use tilepyramid::pyramid::{RunOptions, TilePyramid};
/// use std::path::Path;
///
/// let config = TileSetConfig::builder().with_zoom_range(0, 4).build()?;
/// let pyramid = TilePyramid::new(config);
/// let summary = pyramid.run(
///     Path::new("world.png"),
///     Path::new("tiles"),
///     &RunOptions::default(),
/// )?;
/// println!("{} tiles written", summary.tiles_written);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct TilePyramid {
    config: TileSetConfig,
    engine: Arc<dyn RasterEngine>,
    events: Arc<dyn EventSink>,
}

impl TilePyramid {
    /// Pyramid generator with the production raster engine and no event sink.
    pub fn new(config: TileSetConfig) -> Self {
        Self {
            config,
            engine: Arc::new(ImageEngine::new()),
            events: Arc::new(NullEventSink),
        }
    }

    /// Substitute a different raster engine.
    pub fn with_engine(mut self, engine: Arc<dyn RasterEngine>) -> Self {
        self.engine = engine;
        self
    }

    /// Receive progress events through the given sink.
    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// The configuration this generator runs with.
    pub fn config(&self) -> &TileSetConfig {
        &self.config
    }

    /// Plan the zoom range for `source` without writing anything.
    ///
    /// Existing base images under `tiles_root` are probed so the plan shows
    /// which levels a run would skip.
    pub fn plan(&self, source: &Path, tiles_root: &Path) -> Result<ZoomPlan, PyramidError> {
        let raster = self
            .engine
            .load(source)
            .map_err(|e| PyramidError::SourceUnavailable {
                path: source.to_path_buf(),
                source: e,
            })?;
        Ok(plan_zoom_levels(
            raster.width(),
            raster.height(),
            &self.config,
            |zoom| base_image_is_populated(tiles_root, zoom, self.config.format()),
        ))
    }

    /// Run the whole pipeline.
    ///
    /// # Errors
    ///
    /// The first failing stage aborts the run: [`PyramidError::SourceUnavailable`]
    /// when the source cannot be opened, [`PyramidError::WriteFailed`] when an
    /// output cannot be persisted, [`PyramidError::Engine`] on decode or
    /// transform failures, [`PyramidError::Cancelled`] when the cancel flag
    /// was raised.
    pub fn run(
        &self,
        source: &Path,
        tiles_root: &Path,
        options: &RunOptions,
    ) -> Result<RunSummary, PyramidError> {
        let result = self.run_inner(source, tiles_root, options);
        if let Err(error) = &result {
            tracing::error!(%error, "pyramid run aborted");
        }
        result
    }

    fn run_inner(
        &self,
        source: &Path,
        tiles_root: &Path,
        options: &RunOptions,
    ) -> Result<RunSummary, PyramidError> {
        self.events.emit(&RunEvent::RunStarted {
            zoom_min: self.config.zoom_min(),
            zoom_max: self.config.zoom_max(),
        });

        transition(RunState::Planning);
        let source_raster =
            self.engine
                .load(source)
                .map_err(|e| PyramidError::SourceUnavailable {
                    path: source.to_path_buf(),
                    source: e,
                })?;
        self.events.emit(&RunEvent::SourceLoaded {
            width: source_raster.width(),
            height: source_raster.height(),
        });

        let plan = plan_zoom_levels(
            source_raster.width(),
            source_raster.height(),
            &self.config,
            |zoom| base_image_is_populated(tiles_root, zoom, self.config.format()),
        );
        if !plan.clamped_out().is_empty() {
            tracing::debug!(
                requested_max = plan.requested_max(),
                realized_max = plan.realized_max(),
                "zoom range narrowed to the source resolution"
            );
        }

        transition(RunState::BuildingBaseImages);
        let builder = BaseImageBuilder::new(self.engine.as_ref(), &self.config, self.events.as_ref());
        let built = builder.build(&source_raster, &plan, tiles_root)?;
        drop(source_raster);
        self.events.emit(&RunEvent::BaseImagesReady { built: built.len() });

        let mut tiles_written = 0;
        let mut tiles_skipped = 0;
        for zoom in plan.zooms_ascending() {
            check_cancel(options)?;
            transition(RunState::TilingZoomLevel(zoom));
            let (written, skipped) = self.tile_zoom_level(zoom, tiles_root, options)?;
            tiles_written += written;
            tiles_skipped += skipped;
            self.events.emit(&RunEvent::ZoomTiled {
                zoom,
                written,
                skipped,
            });
        }

        let mut base_images_removed = 0;
        if options.clean_up {
            transition(RunState::CleaningUp);
            base_images_removed = self.remove_base_images(&plan, tiles_root);
        }

        transition(RunState::Done);
        self.events.emit(&RunEvent::RunFinished);
        Ok(RunSummary {
            realized_min: plan.realized_min(),
            realized_max: plan.realized_max(),
            base_images_built: built.len(),
            tiles_written,
            tiles_skipped,
            base_images_removed,
        })
    }

    /// Cut one zoom level's base image into tiles.
    fn tile_zoom_level(
        &self,
        zoom: u8,
        tiles_root: &Path,
        options: &RunOptions,
    ) -> Result<(usize, usize), PyramidError> {
        let path = base_image_path(tiles_root, zoom, self.config.format());
        let base = self.engine.load(&path)?;
        let grid = TileGrid::new(
            zoom,
            base.width(),
            base.height(),
            self.config.tile_size(),
            self.config.tms(),
        );
        let writer = TileWriter::new(self.engine.as_ref(), &self.config);

        let outcomes: Vec<TileOutcome> = if options.parallel {
            let tiles: Vec<Tile> = grid.tiles().collect();
            tiles
                .par_iter()
                .map(|tile| {
                    check_cancel(options)?;
                    writer.write(&base, tile, tiles_root)
                })
                .collect::<Result<_, _>>()?
        } else {
            let mut outcomes = Vec::with_capacity(grid.len());
            for tile in grid.tiles() {
                check_cancel(options)?;
                outcomes.push(writer.write(&base, &tile, tiles_root)?);
            }
            outcomes
        };

        let written = outcomes
            .iter()
            .filter(|o| matches!(o, TileOutcome::Written))
            .count();
        Ok((written, outcomes.len() - written))
    }

    /// Delete the realized range's base images. Tiles are never touched.
    fn remove_base_images(&self, plan: &ZoomPlan, tiles_root: &Path) -> usize {
        let mut removed = 0;
        for zoom in plan.zooms_ascending() {
            let path = base_image_path(tiles_root, zoom, self.config.format());
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "could not remove base image");
                }
            }
        }
        removed
    }
}

fn transition(state: RunState) {
    tracing::debug!(?state, "run state");
}

fn check_cancel(options: &RunOptions) -> Result<(), PyramidError> {
    if let Some(flag) = &options.cancel {
        if flag.load(Ordering::Relaxed) {
            return Err(PyramidError::Cancelled);
        }
    }
    Ok(())
}

/// True when a zoom level's base image exists with actual content.
fn base_image_is_populated(tiles_root: &Path, zoom: u8, format: TileFormat) -> bool {
    fs::metadata(base_image_path(tiles_root, zoom, format))
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}
