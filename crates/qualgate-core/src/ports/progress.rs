//! Progress reporting port for UI integration.

use crate::domain::QualityReport;

/// Events emitted during a batch assessment for progress tracking.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Assessment started for an image.
    Started {
        /// Path to the image.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total images in batch, if known.
        total: Option<usize>,
    },
    /// Assessment completed for an image.
    Completed {
        /// The quality report.
        report: QualityReport,
    },
    /// An image could not be loaded and was skipped.
    Skipped {
        /// Path to the image.
        path: String,
        /// Reason for skipping.
        reason: String,
    },
    /// All images have been processed.
    Finished {
        /// Total images assessed.
        processed: usize,
        /// Total images skipped.
        skipped: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
