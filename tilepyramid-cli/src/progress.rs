//! Terminal progress reporting.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use tilepyramid::events::{EventSink, RunEvent};

/// Event sink that narrates the run through an indicatif spinner.
///
/// Thread-safe: `ProgressBar` synchronizes internally, so events from
/// parallel tile workers are fine.
pub struct ProgressSink {
    bar: ProgressBar,
}

impl ProgressSink {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .expect("valid progress template"),
        );
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }
}

impl Default for ProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for ProgressSink {
    fn emit(&self, event: &RunEvent) {
        match event {
            RunEvent::BaseImageBuilt { .. } | RunEvent::ZoomTiled { .. } => {
                self.bar.println(format!("  {}", style(event).dim()));
                self.bar.set_message(event.to_string());
            }
            RunEvent::RunFinished => {
                self.bar.finish_and_clear();
            }
            other => {
                self.bar.set_message(other.to_string());
            }
        }
    }
}
