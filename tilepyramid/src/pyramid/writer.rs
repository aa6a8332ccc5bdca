//! Tile writing.

use std::path::{Path, PathBuf};

use crate::config::TileSetConfig;
use crate::grid::{Tile, TileCoordinate};
use crate::raster::{Anchor, Raster, RasterEngine};

use super::PyramidError;

/// What happened to one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileOutcome {
    /// The tile file was produced.
    Written,
    /// The file already existed and overwrite is off.
    Skipped,
}

/// Crops, pads and persists individual tiles of one base image.
pub struct TileWriter<'a> {
    engine: &'a dyn RasterEngine,
    config: &'a TileSetConfig,
}

impl<'a> TileWriter<'a> {
    pub fn new(engine: &'a dyn RasterEngine, config: &'a TileSetConfig) -> Self {
        Self { engine, config }
    }

    /// Output path for a tile, from the store pattern plus the format
    /// extension.
    pub fn tile_path(&self, tiles_root: &Path, coord: &TileCoordinate) -> PathBuf {
        let relative = self
            .config
            .store_pattern()
            .render(coord.zoom, coord.x, coord.y);
        tiles_root.join(format!("{relative}.{}", self.config.format().extension()))
    }

    /// Write one tile, or skip it when its file already exists.
    ///
    /// Edge tiles whose crop rectangle runs past the base image are extended
    /// to the full tile size with the fill color. Under TMS the content is
    /// anchored at the bottom of the extended canvas so its bottom edge stays
    /// at the tile's bottom; otherwise it stays at the top-left.
    pub fn write(
        &self,
        base: &Raster,
        tile: &Tile,
        tiles_root: &Path,
    ) -> Result<TileOutcome, PyramidError> {
        let path = self.tile_path(tiles_root, &tile.coord);
        if !self.config.force() && path.is_file() {
            return Ok(TileOutcome::Skipped);
        }

        let tile_size = self.config.tile_size();
        let cropped = self.engine.crop(base, tile.rect)?;
        let full = if cropped.width() < tile_size || cropped.height() < tile_size {
            let anchor = if self.config.tms() {
                Anchor::BottomLeft
            } else {
                Anchor::TopLeft
            };
            self.engine.extend_canvas(
                &cropped,
                tile_size,
                tile_size,
                anchor,
                self.config.fill_color(),
            )?
        } else {
            cropped
        };

        self.engine
            .write(&full, &path, &self.config.encoding())
            .map_err(PyramidError::from_write)?;
        Ok(TileOutcome::Written)
    }
}
