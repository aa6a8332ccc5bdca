//! The raster engine trait.

use std::path::Path;

use crate::grid::CropRect;

use super::{Anchor, EngineError, FillColor, Raster, TileEncoding};

/// Decode, transform and encode rasters on behalf of the pyramid pipeline.
///
/// The pipeline never touches pixels itself; everything it needs is expressed
/// through this capability set. Implementations must be thread-safe
/// (`Send + Sync`) so tile writing can run on a worker pool.
///
/// # Implementors
///
/// - [`ImageEngine`](super::ImageEngine) - the production engine on the
///   `image` crate
pub trait RasterEngine: Send + Sync {
    /// Open and decode the image at `path`.
    ///
    /// # Errors
    ///
    /// [`EngineError::Read`] when the file is missing, unreadable or not a
    /// decodable raster.
    fn load(&self, path: &Path) -> Result<Raster, EngineError>;

    /// Scale a raster to fit within `max_width` x `max_height`, preserving
    /// aspect ratio.
    ///
    /// The result may be smaller than the box on one axis. Scaling up past
    /// the source resolution is permitted; the planner decides whether that
    /// is allowed for a given zoom level.
    fn scale_to_fit(
        &self,
        raster: &Raster,
        max_width: u32,
        max_height: u32,
    ) -> Result<Raster, EngineError>;

    /// Crop the part of `rect` that overlaps the raster.
    ///
    /// The rectangle may extend past any edge; the result is the
    /// intersection and can be smaller than the requested size.
    ///
    /// # Errors
    ///
    /// [`EngineError::EmptyCrop`] when the rectangle does not overlap the
    /// raster at all.
    fn crop(&self, raster: &Raster, rect: CropRect) -> Result<Raster, EngineError>;

    /// Place the raster on a `width` x `height` canvas filled with `fill`.
    ///
    /// The content keeps its left edge; `anchor` decides whether it sits at
    /// the top or the bottom of the new canvas.
    fn extend_canvas(
        &self,
        raster: &Raster,
        width: u32,
        height: u32,
        anchor: Anchor,
        fill: FillColor,
    ) -> Result<Raster, EngineError>;

    /// Encode the raster with the given compression settings and write it to
    /// `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// [`EngineError::CreateDir`] or [`EngineError::Write`] when the
    /// directory or file cannot be produced.
    fn write(&self, raster: &Raster, path: &Path, encoding: &TileEncoding)
        -> Result<(), EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;
    use std::sync::Arc;

    /// Minimal engine that never touches the filesystem.
    struct MockEngine;

    impl RasterEngine for MockEngine {
        fn load(&self, path: &Path) -> Result<Raster, EngineError> {
            Err(EngineError::Read {
                path: path.to_path_buf(),
                source: image::ImageError::IoError(std::io::Error::from(
                    std::io::ErrorKind::NotFound,
                )),
            })
        }

        fn scale_to_fit(
            &self,
            _raster: &Raster,
            max_width: u32,
            max_height: u32,
        ) -> Result<Raster, EngineError> {
            Ok(Raster::from_image(DynamicImage::new_rgba8(
                max_width, max_height,
            )))
        }

        fn crop(&self, raster: &Raster, rect: CropRect) -> Result<Raster, EngineError> {
            let (_, _, w, h) = rect.intersection(raster.width(), raster.height()).ok_or(
                EngineError::EmptyCrop {
                    rect,
                    width: raster.width(),
                    height: raster.height(),
                },
            )?;
            Ok(Raster::from_image(DynamicImage::new_rgba8(w, h)))
        }

        fn extend_canvas(
            &self,
            _raster: &Raster,
            width: u32,
            height: u32,
            _anchor: Anchor,
            _fill: FillColor,
        ) -> Result<Raster, EngineError> {
            Ok(Raster::from_image(DynamicImage::new_rgba8(width, height)))
        }

        fn write(
            &self,
            _raster: &Raster,
            _path: &Path,
            _encoding: &TileEncoding,
        ) -> Result<(), EngineError> {
            Ok(())
        }
    }

    #[test]
    fn test_trait_object_usable() {
        let engine: Arc<dyn RasterEngine> = Arc::new(MockEngine);
        let raster = engine
            .scale_to_fit(
                &Raster::from_image(DynamicImage::new_rgba8(512, 512)),
                256,
                256,
            )
            .unwrap();
        assert_eq!(raster.width(), 256);
    }

    #[test]
    fn test_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn RasterEngine>();
    }

    #[test]
    fn test_mock_load_reports_read_error() {
        let engine = MockEngine;
        let err = engine.load(Path::new("/nowhere.png")).unwrap_err();
        assert!(matches!(err, EngineError::Read { .. }));
    }
}
