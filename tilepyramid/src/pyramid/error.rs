//! Pyramid run errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::raster::EngineError;

/// Errors that abort a pyramid run.
///
/// Every variant is terminal: the run stops at the first error, nothing is
/// retried and no partially written level is rolled back. A rerun with
/// `force` off resumes where the outputs stop.
#[derive(Debug, Error)]
pub enum PyramidError {
    /// The source image is missing or unreadable.
    #[error("cannot read source image {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: EngineError,
    },

    /// An output file or directory could not be written.
    #[error("write failed: {0}")]
    WriteFailed(#[source] EngineError),

    /// The raster engine failed to decode or transform an image.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The cancel flag was raised between tiles or levels.
    #[error("run cancelled")]
    Cancelled,
}

impl PyramidError {
    /// Classify an engine error from a write call: filesystem output
    /// failures become [`PyramidError::WriteFailed`], everything else stays
    /// an engine failure.
    pub(crate) fn from_write(err: EngineError) -> Self {
        match err {
            EngineError::Write { .. } | EngineError::CreateDir { .. } => {
                PyramidError::WriteFailed(err)
            }
            other => PyramidError::Engine(other),
        }
    }
}
