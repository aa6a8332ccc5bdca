//! The tile pyramid pipeline.
//!
//! A run flows top-down through three stages:
//!
//! ```text
//! ZoomPlanner ──► BaseImageBuilder ──► TileGrid + TileWriter
//!  (realized        (one scaled image    (crop, pad and persist
//!   zoom range)      per zoom level)      every tile)
//! ```
//!
//! [`TilePyramid`] sequences the stages and owns the policy around them:
//! resume semantics via per-file existence checks, optional base image
//! cleanup, optional parallel tile writing and cooperative cancellation.

mod base;
mod error;
mod orchestrator;
mod writer;

pub use base::{base_image_path, BaseImage, BaseImageBuilder};
pub use error::PyramidError;
pub use orchestrator::{RunOptions, RunSummary, TilePyramid};
pub use writer::{TileOutcome, TileWriter};
