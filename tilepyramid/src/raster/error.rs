//! Error type for raster engine operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::grid::CropRect;

/// Errors reported by a raster engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The image file could not be opened or decoded.
    #[error("cannot read image {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The image could not be encoded or written out.
    #[error("cannot write image {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The output directory could not be created.
    #[error("cannot create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The crop rectangle does not overlap the raster at all.
    #[error("crop rectangle {rect:?} lies outside the {width}x{height} raster")]
    EmptyCrop {
        rect: CropRect,
        width: u32,
        height: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_crop_display_names_rect_and_size() {
        let err = EngineError::EmptyCrop {
            rect: CropRect {
                x: 512,
                y: 0,
                width: 256,
                height: 256,
            },
            width: 512,
            height: 512,
        };
        let text = err.to_string();
        assert!(text.contains("512x512"), "unexpected message: {text}");
        assert!(text.contains("outside"), "unexpected message: {text}");
    }
}
