//! Quality check trait.

use super::{CheckKind, CheckOutcome, ImageInfo};

/// A single pixel-level quality check.
///
/// Checks are stateless apart from their thresholds and never fail: they
/// operate on an image that is already known to be a valid bitmap.
pub trait QualityCheck: Send + Sync {
    /// Which check this is.
    fn kind(&self) -> CheckKind;

    /// Measures the image and compares the measurement to the thresholds.
    fn evaluate(&self, image: &ImageInfo) -> CheckOutcome;

    /// Returns the name of this check.
    fn name(&self) -> &'static str {
        self.kind().as_str()
    }
}
