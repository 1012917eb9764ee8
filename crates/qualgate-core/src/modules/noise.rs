//! Noise estimation module.
//!
//! Noise is measured as the standard deviation of the residual left after
//! subtracting a 3x3 Gaussian-smoothed copy of the luminance plane.

use image::GrayImage;

use crate::domain::{CheckKind, CheckOutcome, ImageInfo, Measurement, QualityCheck};
use crate::imaging::{gaussian_3x3, residual, stats};

/// Configuration for the noise check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseConfig {
    /// Maximum residual standard deviation (inclusive).
    pub threshold: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self { threshold: 10.0 }
    }
}

/// Standard deviation of `luma - gaussian_3x3(luma)`.
#[must_use]
pub fn noise_level(luma: &GrayImage) -> f64 {
    let smoothed = gaussian_3x3(luma);
    stats::std_dev(&residual(luma, &smoothed))
}

/// Noise check.
#[derive(Debug, Clone, Default)]
pub struct NoiseCheck {
    config: NoiseConfig,
}

impl NoiseCheck {
    /// Creates a new noise check.
    #[must_use]
    pub const fn new(config: NoiseConfig) -> Self {
        Self { config }
    }
}

impl QualityCheck for NoiseCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Noise
    }

    fn evaluate(&self, image: &ImageInfo) -> CheckOutcome {
        let level = noise_level(image.luma());
        CheckOutcome {
            check: CheckKind::Noise,
            passed: level <= self.config.threshold,
            measurement: Measurement::Value { value: level },
        }
    }
}
