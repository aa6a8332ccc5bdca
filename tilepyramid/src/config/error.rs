//! Validation errors for tile set configuration.

use thiserror::Error;

/// Errors rejected by [`TileSetConfigBuilder::build`](super::TileSetConfigBuilder::build).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Tile size of zero.
    #[error("tile size must be greater than zero")]
    ZeroTileSize,

    /// `zoom_min` above `zoom_max`.
    #[error("zoom range {min}..={max} is inverted")]
    InvertedZoomRange { min: u8, max: u8 },

    /// The largest zoom level would need a base image wider than `u32` pixels.
    #[error("zoom {zoom} with tile size {tile_size} exceeds the supported raster dimensions")]
    ZoomRangeTooLarge { zoom: u8, tile_size: u32 },

    /// JPEG quality above 100.
    #[error("jpeg quality {0} is out of range 0-100")]
    QualityOutOfRange(u8),

    /// Store pattern without exactly three integer slots.
    #[error("store pattern '{pattern}' must contain exactly three %d slots, found {slots}")]
    InvalidPattern { pattern: String, slots: usize },
}
