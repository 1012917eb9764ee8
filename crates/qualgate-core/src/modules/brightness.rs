//! Brightness check.
//!
//! Passes when the mean luminance sits strictly inside `(lower, upper)`.

use image::GrayImage;

use crate::domain::{CheckKind, CheckOutcome, ImageInfo, Measurement, QualityCheck};
use crate::imaging::Histogram;

/// Configuration for the brightness check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessConfig {
    /// Exclusive lower bound on mean luminance (0-255).
    pub lower: f64,
    /// Exclusive upper bound on mean luminance (0-255).
    pub upper: f64,
}

impl Default for BrightnessConfig {
    fn default() -> Self {
        Self {
            lower: 30.0,
            upper: 220.0,
        }
    }
}

/// Mean luminance of the image.
#[must_use]
pub fn mean_luminance(luma: &GrayImage) -> f64 {
    Histogram::from_luma(luma).mean()
}

/// Brightness check.
#[derive(Debug, Clone, Default)]
pub struct BrightnessCheck {
    config: BrightnessConfig,
}

impl BrightnessCheck {
    /// Creates a new brightness check with the given bounds.
    #[must_use]
    pub const fn new(config: BrightnessConfig) -> Self {
        Self { config }
    }
}

impl QualityCheck for BrightnessCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Brightness
    }

    fn evaluate(&self, image: &ImageInfo) -> CheckOutcome {
        let mean = mean_luminance(image.luma());
        CheckOutcome {
            check: CheckKind::Brightness,
            passed: self.config.lower < mean && mean < self.config.upper,
            measurement: Measurement::Value { value: mean },
        }
    }
}
