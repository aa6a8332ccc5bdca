//! Raster engine abstraction.
//!
//! The pyramid pipeline plans zoom levels and tile grids; actual pixel work
//! (decode, scale, crop, pad, encode) goes through the [`RasterEngine`]
//! trait so different engines can be swapped without touching the pipeline.
//!
//! ```text
//! ┌──────────────────────┐
//! │  Pyramid pipeline    │
//! │                      │
//! │  Arc<dyn RasterEngine>
//! └──────────┬───────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐
//! │    RasterEngine      │ (trait)
//! └──────────┬───────────┘
//!            │
//!            ▼
//!     ┌─────────────┐
//!     │ ImageEngine │
//!     └─────────────┘
//! ```
//!
//! [`ImageEngine`] is the production implementation on the `image` crate;
//! tests substitute mocks through the same trait.

mod engine;
mod error;
mod image_engine;
mod types;

pub use engine::RasterEngine;
pub use error::EngineError;
pub use image_engine::ImageEngine;
pub use types::{
    Anchor, FillColor, ParseFillColorError, ParseFormatError, Raster, TileEncoding, TileFormat,
};
