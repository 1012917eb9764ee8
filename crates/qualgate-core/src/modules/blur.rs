//! Blur detection module.
//!
//! Uses the variance of the Laplacian as a focus measure: sharp images have
//! many strong second-derivative responses, blurred ones have few.

use image::GrayImage;

use crate::domain::{CheckKind, CheckOutcome, ImageInfo, Measurement, QualityCheck};
use crate::imaging::{laplacian, stats};

/// Configuration for blur detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurConfig {
    /// Minimum Laplacian variance for an image to count as sharp (inclusive).
    pub threshold: f64,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self { threshold: 50.0 }
    }
}

/// Population variance of the Laplacian response over the whole image.
#[must_use]
pub fn laplacian_variance(luma: &GrayImage) -> f64 {
    stats::variance(&laplacian(luma))
}

/// Blur detection check.
#[derive(Debug, Clone, Default)]
pub struct BlurCheck {
    config: BlurConfig,
}

impl BlurCheck {
    /// Creates a new blur check with the given configuration.
    #[must_use]
    pub const fn new(config: BlurConfig) -> Self {
        Self { config }
    }
}

impl QualityCheck for BlurCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Blur
    }

    fn evaluate(&self, image: &ImageInfo) -> CheckOutcome {
        let variance = laplacian_variance(image.luma());
        CheckOutcome {
            check: CheckKind::Blur,
            passed: variance >= self.config.threshold,
            measurement: Measurement::Value { value: variance },
        }
    }
}
