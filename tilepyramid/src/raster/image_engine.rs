//! Production raster engine backed by the `image` crate.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::grid::CropRect;

use super::{Anchor, EngineError, FillColor, Raster, RasterEngine, TileEncoding};

/// Raster engine implemented with the `image` crate.
///
/// Scaling uses Catmull-Rom resampling, a reasonable quality/speed trade-off
/// for photographic sources. The filter can be swapped out:
///
/// ```
/// use tilepyramid::raster::ImageEngine;
/// use image::imageops::FilterType;
///
/// let engine = ImageEngine::new().with_filter(FilterType::Lanczos3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ImageEngine {
    filter: FilterType,
}

impl ImageEngine {
    /// Engine with the default Catmull-Rom resampling filter.
    pub fn new() -> Self {
        Self {
            filter: FilterType::CatmullRom,
        }
    }

    /// Use a different resampling filter for scaling.
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }
}

impl Default for ImageEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterEngine for ImageEngine {
    fn load(&self, path: &Path) -> Result<Raster, EngineError> {
        let image = image::open(path).map_err(|source| EngineError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Raster::from_image(image))
    }

    fn scale_to_fit(
        &self,
        raster: &Raster,
        max_width: u32,
        max_height: u32,
    ) -> Result<Raster, EngineError> {
        let scaled = raster.as_image().resize(max_width, max_height, self.filter);
        Ok(Raster::from_image(scaled))
    }

    fn crop(&self, raster: &Raster, rect: CropRect) -> Result<Raster, EngineError> {
        let (x, y, width, height) = rect
            .intersection(raster.width(), raster.height())
            .ok_or(EngineError::EmptyCrop {
                rect,
                width: raster.width(),
                height: raster.height(),
            })?;
        let cropped = raster.as_image().crop_imm(x, y, width, height);
        Ok(Raster::from_image(cropped))
    }

    fn extend_canvas(
        &self,
        raster: &Raster,
        width: u32,
        height: u32,
        anchor: Anchor,
        fill: FillColor,
    ) -> Result<Raster, EngineError> {
        let mut canvas = RgbaImage::from_pixel(width, height, fill.to_rgba());
        let y = match anchor {
            Anchor::TopLeft => 0,
            Anchor::BottomLeft => i64::from(height) - i64::from(raster.height()),
        };
        imageops::overlay(&mut canvas, raster.as_image(), 0, y);
        Ok(Raster::from_image(DynamicImage::ImageRgba8(canvas)))
    }

    fn write(
        &self,
        raster: &Raster,
        path: &Path,
        encoding: &TileEncoding,
    ) -> Result<(), EngineError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| EngineError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let write_err = |source| EngineError::Write {
            path: path.to_path_buf(),
            source,
        };
        let io_write_err = |source| EngineError::Write {
            path: path.to_path_buf(),
            source: image::ImageError::IoError(source),
        };

        let file = File::create(path).map_err(io_write_err)?;
        let mut writer = BufWriter::new(file);
        match encoding.format {
            super::TileFormat::Jpeg => {
                // JPEG has no alpha channel; flatten to RGB before encoding.
                let rgb = raster.as_image().to_rgb8();
                let encoder = JpegEncoder::new_with_quality(&mut writer, encoding.jpeg_quality);
                rgb.write_with_encoder(encoder).map_err(write_err)?;
            }
            super::TileFormat::Png => {
                raster
                    .as_image()
                    .write_to(&mut writer, ImageFormat::Png)
                    .map_err(write_err)?;
            }
        }
        writer.flush().map_err(io_write_err)
    }
}
