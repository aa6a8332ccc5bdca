//! Base image building.
//!
//! Each realized zoom level gets one full-extent image scaled from the
//! source, written next to the tile tree as `<tiles_root>/<zoom>.<ext>`.
//! Levels are built from the highest zoom down so each scale can start from
//! the previous, larger intermediate instead of the full source.

use std::path::{Path, PathBuf};

use crate::config::TileSetConfig;
use crate::events::{EventSink, RunEvent};
use crate::planner::ZoomPlan;
use crate::raster::{Raster, RasterEngine, TileFormat};

use super::PyramidError;

/// One zoom level's base image as written to disk.
///
/// The actual dimensions come from the aspect-preserving fit and may be
/// smaller than the level target on one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseImage {
    /// Zoom level.
    pub zoom: u8,
    /// On-disk width in pixels.
    pub width: u32,
    /// On-disk height in pixels.
    pub height: u32,
    /// Location of the level file.
    pub path: PathBuf,
}

/// Path of a zoom level's base image file.
pub fn base_image_path(tiles_root: &Path, zoom: u8, format: TileFormat) -> PathBuf {
    tiles_root.join(format!("{zoom}.{}", format.extension()))
}

/// Builds the per-level base images for a zoom plan.
pub struct BaseImageBuilder<'a> {
    engine: &'a dyn RasterEngine,
    config: &'a TileSetConfig,
    events: &'a dyn EventSink,
}

impl<'a> BaseImageBuilder<'a> {
    pub fn new(
        engine: &'a dyn RasterEngine,
        config: &'a TileSetConfig,
        events: &'a dyn EventSink,
    ) -> Self {
        Self {
            engine,
            config,
            events,
        }
    }

    /// Scale and persist a base image for every non-skipped level in the plan.
    ///
    /// Skipped levels keep their existing file untouched. Returns the images
    /// actually written, highest zoom first.
    ///
    /// # Errors
    ///
    /// [`PyramidError::WriteFailed`] aborts the remaining levels as soon as
    /// one level file cannot be persisted.
    pub fn build(
        &self,
        source: &Raster,
        plan: &ZoomPlan,
        tiles_root: &Path,
    ) -> Result<Vec<BaseImage>, PyramidError> {
        let encoding = self.config.encoding();
        let mut built = Vec::new();
        // The previous level's raster, kept as the next scale source.
        let mut working: Option<Raster> = None;

        for level in plan.levels() {
            if level.skip {
                tracing::debug!(zoom = level.zoom, "base image exists, skipping");
                continue;
            }

            let scale_source = working.as_ref().unwrap_or(source);
            let scaled =
                self.engine
                    .scale_to_fit(scale_source, level.target_width, level.target_height)?;
            let path = base_image_path(tiles_root, level.zoom, self.config.format());
            self.engine
                .write(&scaled, &path, &encoding)
                .map_err(PyramidError::from_write)?;

            self.events.emit(&RunEvent::BaseImageBuilt {
                zoom: level.zoom,
                width: scaled.width(),
                height: scaled.height(),
            });
            built.push(BaseImage {
                zoom: level.zoom,
                width: scaled.width(),
                height: scaled.height(),
                path,
            });
            working = Some(scaled);
        }

        Ok(built)
    }
}
