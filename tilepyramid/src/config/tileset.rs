//! Tile set configuration.

use crate::raster::{FillColor, TileEncoding, TileFormat};

use super::{ConfigError, StorePattern};

/// Immutable parameter set for one pyramid run.
///
/// Built once through [`TileSetConfigBuilder`], validated at construction
/// and never mutated afterwards. The planner reports the realized zoom range
/// as a separate value instead of writing it back here.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSetConfig {
    tile_size: u32,
    store_pattern: StorePattern,
    zoom_min: u8,
    zoom_max: u8,
    tms: bool,
    fill_color: FillColor,
    format: TileFormat,
    jpeg_quality: u8,
    force: bool,
    scaling_up_limit: u8,
}

impl TileSetConfig {
    /// Start building a configuration from the defaults.
    pub fn builder() -> TileSetConfigBuilder {
        TileSetConfigBuilder::new()
    }

    /// Tile edge length in pixels.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Tile path template.
    pub fn store_pattern(&self) -> &StorePattern {
        &self.store_pattern
    }

    /// Lowest requested zoom level.
    pub fn zoom_min(&self) -> u8 {
        self.zoom_min
    }

    /// Highest requested zoom level.
    pub fn zoom_max(&self) -> u8 {
        self.zoom_max
    }

    /// True when tile rows are numbered bottom-to-top.
    pub fn tms(&self) -> bool {
        self.tms
    }

    /// Fill color for padded tile regions.
    pub fn fill_color(&self) -> FillColor {
        self.fill_color
    }

    /// Output format for base images and tiles.
    pub fn format(&self) -> TileFormat {
        self.format
    }

    /// JPEG quality, 0 to 100.
    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    /// True when existing outputs are rewritten instead of skipped.
    pub fn force(&self) -> bool {
        self.force
    }

    /// Highest zoom level at which the source may be scaled up past its
    /// native resolution. Zero means upscaling is never allowed.
    pub fn scaling_up_limit(&self) -> u8 {
        self.scaling_up_limit
    }

    /// Compression settings for persisting rasters.
    pub fn encoding(&self) -> TileEncoding {
        TileEncoding::new(self.format, self.jpeg_quality)
    }
}

impl Default for TileSetConfig {
    fn default() -> Self {
        // The defaults always validate.
        TileSetConfigBuilder::new()
            .build()
            .expect("default configuration is valid")
    }
}

/// Builder for [`TileSetConfig`].
///
/// ```
/// use tilepyramid::config::TileSetConfig;
/// use tilepyramid::raster::TileFormat;
///
/// let config = TileSetConfig::builder()
///     .with_zoom_range(0, 4)
///     .with_format(TileFormat::Png)
///     .build()
///     .unwrap();
/// assert_eq!(config.tile_size(), 256);
/// ```
#[derive(Debug, Clone)]
pub struct TileSetConfigBuilder {
    tile_size: u32,
    store_pattern: StorePattern,
    zoom_min: u8,
    zoom_max: u8,
    tms: bool,
    fill_color: FillColor,
    format: TileFormat,
    jpeg_quality: u8,
    force: bool,
    scaling_up_limit: u8,
}

impl TileSetConfigBuilder {
    /// Builder seeded with the defaults: 256 pixel tiles, `%d/%d/%d` layout,
    /// zoom 0 to 8, TMS rows, white fill, JPEG at quality 80, no overwrite,
    /// no upscaling.
    pub fn new() -> Self {
        Self {
            tile_size: 256,
            store_pattern: StorePattern::default(),
            zoom_min: 0,
            zoom_max: 8,
            tms: true,
            fill_color: FillColor::WHITE,
            format: TileFormat::Jpeg,
            jpeg_quality: 80,
            force: false,
            scaling_up_limit: 0,
        }
    }

    /// Set the tile edge length in pixels.
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Set the tile path template.
    pub fn with_store_pattern(mut self, pattern: StorePattern) -> Self {
        self.store_pattern = pattern;
        self
    }

    /// Set the requested zoom range.
    pub fn with_zoom_range(mut self, zoom_min: u8, zoom_max: u8) -> Self {
        self.zoom_min = zoom_min;
        self.zoom_max = zoom_max;
        self
    }

    /// Number tile rows bottom-to-top (true) or top-to-bottom (false).
    pub fn with_tms(mut self, tms: bool) -> Self {
        self.tms = tms;
        self
    }

    /// Set the fill color for padded tile regions.
    pub fn with_fill_color(mut self, fill_color: FillColor) -> Self {
        self.fill_color = fill_color;
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: TileFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the JPEG quality (0 to 100).
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Rewrite outputs that already exist.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Allow upscaling the source for zoom levels up to `limit` (0 disables).
    pub fn with_scaling_up_limit(mut self, limit: u8) -> Self {
        self.scaling_up_limit = limit;
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(self) -> Result<TileSetConfig, ConfigError> {
        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        if self.zoom_min > self.zoom_max {
            return Err(ConfigError::InvertedZoomRange {
                min: self.zoom_min,
                max: self.zoom_max,
            });
        }
        if self.jpeg_quality > 100 {
            return Err(ConfigError::QualityOutOfRange(self.jpeg_quality));
        }
        // Base image dimensions are u32; the top level must stay addressable.
        if self.zoom_max >= 32
            || (u64::from(self.tile_size) << self.zoom_max) > u64::from(u32::MAX)
        {
            return Err(ConfigError::ZoomRangeTooLarge {
                zoom: self.zoom_max,
                tile_size: self.tile_size,
            });
        }
        Ok(TileSetConfig {
            tile_size: self.tile_size,
            store_pattern: self.store_pattern,
            zoom_min: self.zoom_min,
            zoom_max: self.zoom_max,
            tms: self.tms,
            fill_color: self.fill_color,
            format: self.format,
            jpeg_quality: self.jpeg_quality,
            force: self.force,
            scaling_up_limit: self.scaling_up_limit,
        })
    }
}

impl Default for TileSetConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
