//! Tile grid partitioning.
//!
//! Given the pixel dimensions of one zoom level's base image, this module
//! enumerates the grid of fixed-size tiles covering it and computes the
//! source crop rectangle for each tile, applying the TMS row-orientation
//! rule. Everything here is pure coordinate arithmetic; pixel work happens
//! in the raster engine.

mod types;

pub use types::{CropRect, Tile, TileCoordinate};

/// The tile grid of one zoom level's base image.
///
/// Grid size is `ceil(base_width / tile_size) x ceil(base_height / tile_size)`.
/// Crop rectangles at the grid edges may extend past the image bounds (and,
/// under TMS, above the top edge); the tile writer pads those, the grid never
/// clamps them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    zoom: u8,
    base_width: u32,
    base_height: u32,
    tile_size: u32,
    tms: bool,
    grid_x: u32,
    grid_y: u32,
}

impl TileGrid {
    /// Partition a base image of the given dimensions into a tile grid.
    ///
    /// # Arguments
    ///
    /// * `zoom` - Zoom level the base image belongs to
    /// * `base_width`, `base_height` - Actual pixel dimensions of the base image
    /// * `tile_size` - Tile edge length in pixels (must be non-zero)
    /// * `tms` - When true, row index 0 is the bottom row of the image
    pub fn new(zoom: u8, base_width: u32, base_height: u32, tile_size: u32, tms: bool) -> Self {
        debug_assert!(tile_size > 0, "tile size must be non-zero");
        let grid_x = base_width.div_ceil(tile_size);
        let grid_y = base_height.div_ceil(tile_size);
        Self {
            zoom,
            base_width,
            base_height,
            tile_size,
            tms,
            grid_x,
            grid_y,
        }
    }

    /// Number of tile columns.
    pub fn grid_x(&self) -> u32 {
        self.grid_x
    }

    /// Number of tile rows.
    pub fn grid_y(&self) -> u32 {
        self.grid_y
    }

    /// Total number of tiles in the grid.
    pub fn len(&self) -> usize {
        self.grid_x as usize * self.grid_y as usize
    }

    /// True when the grid contains no tiles (a zero-sized base image).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The tile at grid cell `(ix, iy)`.
    ///
    /// `iy` always counts in iteration order (top-to-bottom); under TMS the
    /// crop rectangle for row `iy` sits at `base_height - (iy + 1) * tile_size`
    /// so that row 0 maps to the bottom of the image.
    pub fn tile_at(&self, ix: u32, iy: u32) -> Tile {
        debug_assert!(ix < self.grid_x && iy < self.grid_y);
        let t = i64::from(self.tile_size);
        let x = i64::from(ix) * t;
        let y = if self.tms {
            i64::from(self.base_height) - (i64::from(iy) + 1) * t
        } else {
            i64::from(iy) * t
        };
        Tile {
            coord: TileCoordinate {
                zoom: self.zoom,
                x: ix,
                y: iy,
            },
            rect: CropRect {
                x,
                y,
                width: self.tile_size,
                height: self.tile_size,
            },
        }
    }

    /// Iterate over all tiles, column by column (`ix` outer, `iy` inner).
    pub fn tiles(&self) -> Tiles<'_> {
        Tiles {
            grid: self,
            ix: 0,
            iy: 0,
        }
    }
}

/// Iterator over the tiles of a [`TileGrid`].
#[derive(Debug)]
pub struct Tiles<'a> {
    grid: &'a TileGrid,
    ix: u32,
    iy: u32,
}

impl Iterator for Tiles<'_> {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        if self.ix >= self.grid.grid_x || self.grid.grid_y == 0 {
            return None;
        }
        let tile = self.grid.tile_at(self.ix, self.iy);
        self.iy += 1;
        if self.iy == self.grid.grid_y {
            self.iy = 0;
            self.ix += 1;
        }
        Some(tile)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let done = self.ix as usize * self.grid.grid_y as usize + self.iy as usize;
        let remaining = self.grid.len() - done;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Tiles<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_size_exact_multiple() {
        let grid = TileGrid::new(1, 512, 512, 256, true);
        assert_eq!(grid.grid_x(), 2);
        assert_eq!(grid.grid_y(), 2);
        assert_eq!(grid.len(), 4);
    }

    #[test]
    fn test_grid_size_rounds_up() {
        let grid = TileGrid::new(3, 300, 200, 256, false);
        assert_eq!(grid.grid_x(), 2);
        assert_eq!(grid.grid_y(), 1);
    }

    #[test]
    fn test_tms_row_zero_sits_at_bottom() {
        let grid = TileGrid::new(1, 512, 512, 256, true);
        let tile = grid.tile_at(0, 0);
        assert_eq!(tile.rect.y, 256);
        let tile = grid.tile_at(0, 1);
        assert_eq!(tile.rect.y, 0);
    }

    #[test]
    fn test_xyz_row_zero_sits_at_top() {
        let grid = TileGrid::new(1, 512, 512, 256, false);
        let tile = grid.tile_at(0, 0);
        assert_eq!(tile.rect.y, 0);
        let tile = grid.tile_at(0, 1);
        assert_eq!(tile.rect.y, 256);
    }

    #[test]
    fn test_tms_top_row_rect_goes_negative() {
        // 171 pixels tall, one 256-pixel row: the TMS rectangle starts above
        // the image and the writer pads what the crop cannot cover.
        let grid = TileGrid::new(0, 256, 171, 256, true);
        assert_eq!(grid.grid_y(), 1);
        let tile = grid.tile_at(0, 0);
        assert_eq!(tile.rect.y, 171 - 256);
        assert_eq!(tile.rect.height, 256);
    }

    #[test]
    fn test_zoom_zero_single_cell_covers_image() {
        let grid = TileGrid::new(0, 256, 256, 256, true);
        assert_eq!(grid.len(), 1);
        let tile = grid.tile_at(0, 0);
        assert_eq!(tile.coord, TileCoordinate { zoom: 0, x: 0, y: 0 });
        assert_eq!(
            tile.rect,
            CropRect {
                x: 0,
                y: 0,
                width: 256,
                height: 256
            }
        );
    }

    #[test]
    fn test_iteration_order_is_column_major() {
        let grid = TileGrid::new(2, 768, 512, 256, false);
        let coords: Vec<(u32, u32)> = grid.tiles().map(|t| (t.coord.x, t.coord.y)).collect();
        assert_eq!(
            coords,
            vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]
        );
    }

    #[test]
    fn test_iterator_len_matches_grid_len() {
        let grid = TileGrid::new(4, 1000, 700, 256, true);
        assert_eq!(grid.tiles().count(), grid.len());
        assert_eq!(grid.tiles().len(), grid.len());
    }

    #[test]
    fn test_zero_sized_base_yields_no_tiles() {
        let grid = TileGrid::new(0, 0, 0, 256, true);
        assert!(grid.is_empty());
        assert_eq!(grid.tiles().count(), 0);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_grid_dimensions_cover_image(
                width in 1u32..5000,
                height in 1u32..5000,
                tile_size in 1u32..1024,
                tms in proptest::bool::ANY
            ) {
                let grid = TileGrid::new(5, width, height, tile_size, tms);
                // Enough cells to cover every pixel, but no spare column or row.
                prop_assert!(grid.grid_x() as u64 * tile_size as u64 >= width as u64);
                prop_assert!((grid.grid_x() as u64 - 1) * (tile_size as u64) < width as u64);
                prop_assert!(grid.grid_y() as u64 * tile_size as u64 >= height as u64);
                prop_assert!((grid.grid_y() as u64 - 1) * (tile_size as u64) < height as u64);
            }

            #[test]
            fn test_every_rect_intersects_image(
                width in 1u32..3000,
                height in 1u32..3000,
                tile_size in 64u32..512,
                tms in proptest::bool::ANY
            ) {
                let grid = TileGrid::new(7, width, height, tile_size, tms);
                for tile in grid.tiles() {
                    let rect = tile.rect;
                    prop_assert!(rect.x >= 0);
                    prop_assert!(rect.x < width as i64);
                    prop_assert!(rect.y < height as i64);
                    prop_assert!(rect.y + tile_size as i64 > 0);
                    prop_assert!(rect.intersection(width, height).is_some());
                }
            }

            #[test]
            fn test_tms_flip_is_vertical_mirror(
                width in 1u32..3000,
                height in 1u32..3000,
                tile_size in 1u32..512
            ) {
                let tms = TileGrid::new(6, width, height, tile_size, true);
                let xyz = TileGrid::new(6, width, height, tile_size, false);
                prop_assert_eq!(tms.grid_y(), xyz.grid_y());
                let rows = tms.grid_y();
                for iy in 0..rows {
                    let flipped = xyz.tile_at(0, rows - 1 - iy);
                    let t = tms.tile_at(0, iy);
                    // Same set of vertical offsets, numbered from the other end,
                    // shifted when the height is not a tile multiple.
                    let shift = (height % tile_size) as i64;
                    let expected = if shift == 0 {
                        flipped.rect.y
                    } else {
                        flipped.rect.y - (tile_size as i64 - shift)
                    };
                    prop_assert_eq!(t.rect.y, expected);
                }
            }

            #[test]
            fn test_tile_coordinates_unique_and_in_range(
                width in 1u32..2000,
                height in 1u32..2000,
                tile_size in 16u32..512,
                tms in proptest::bool::ANY
            ) {
                let grid = TileGrid::new(3, width, height, tile_size, tms);
                let mut seen = std::collections::HashSet::new();
                for tile in grid.tiles() {
                    prop_assert!(tile.coord.x < grid.grid_x());
                    prop_assert!(tile.coord.y < grid.grid_y());
                    prop_assert!(seen.insert((tile.coord.x, tile.coord.y)));
                }
                prop_assert_eq!(seen.len(), grid.len());
            }
        }
    }
}
