//! Structured progress events.
//!
//! The pipeline reports progress through the [`EventSink`] trait instead of
//! calling into any specific logging or UI mechanism. Events fire at fixed
//! checkpoints: run start and end, source load, each base image, each tiled
//! zoom level. Sinks must tolerate notifications from worker threads when
//! tile writing is parallelized.

use std::fmt;

/// A checkpoint in a pyramid run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEvent {
    /// The run started with this requested zoom range.
    RunStarted { zoom_min: u8, zoom_max: u8 },
    /// The source image was opened and measured.
    SourceLoaded { width: u32, height: u32 },
    /// One zoom level's base image was scaled and written.
    BaseImageBuilt { zoom: u8, width: u32, height: u32 },
    /// All base images exist; tiling can begin.
    BaseImagesReady { built: usize },
    /// One zoom level was fully tiled.
    ZoomTiled {
        zoom: u8,
        written: usize,
        skipped: usize,
    },
    /// The run completed.
    RunFinished,
}

impl fmt::Display for RunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunEvent::RunStarted { zoom_min, zoom_max } => {
                write!(f, "pyramid run started, zoom {zoom_min}..={zoom_max}")
            }
            RunEvent::SourceLoaded { width, height } => {
                write!(f, "source image loaded, {width}x{height}")
            }
            RunEvent::BaseImageBuilt { zoom, width, height } => {
                write!(f, "base image created for zoom {zoom}, {width}x{height}")
            }
            RunEvent::BaseImagesReady { built } => {
                write!(f, "base images ready, {built} created")
            }
            RunEvent::ZoomTiled {
                zoom,
                written,
                skipped,
            } => {
                write!(
                    f,
                    "tiles created for zoom {zoom}, {written} written, {skipped} skipped"
                )
            }
            RunEvent::RunFinished => write!(f, "pyramid run finished"),
        }
    }
}

/// Receives progress events from a pyramid run.
///
/// Implementations must be thread-safe; with parallel tile writing enabled,
/// events may arrive from worker threads.
pub trait EventSink: Send + Sync {
    /// Handle one progress event.
    fn emit(&self, event: &RunEvent);
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn emit(&self, _event: &RunEvent) {}
}

/// Sink that forwards events to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: &RunEvent) {
        tracing::info!("{event}");
    }
}
