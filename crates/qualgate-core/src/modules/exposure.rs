//! Exposure (tonal range) module.
//!
//! A well-exposed image spreads its luminance over a wide range: the gap
//! between a low and a high percentile must exceed a minimum.

use image::GrayImage;

use crate::domain::{CheckKind, CheckOutcome, ImageInfo, Measurement, QualityCheck};
use crate::imaging::Histogram;

/// Configuration for exposure analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureConfig {
    /// Lower percentile (0-100).
    pub lower_percentile: f64,
    /// Upper percentile (0-100).
    pub upper_percentile: f64,
    /// Minimum spread between the two percentiles (exclusive).
    pub min_range: f64,
}

impl Default for ExposureConfig {
    fn default() -> Self {
        Self {
            lower_percentile: 5.0,
            upper_percentile: 95.0,
            min_range: 50.0,
        }
    }
}

/// Luminance values at the two percentiles, linearly interpolated.
#[must_use]
pub fn tonal_bounds(luma: &GrayImage, lower_percentile: f64, upper_percentile: f64) -> (f64, f64) {
    let histogram = Histogram::from_luma(luma);
    (
        histogram.percentile(lower_percentile),
        histogram.percentile(upper_percentile),
    )
}

/// Exposure check.
#[derive(Debug, Clone, Default)]
pub struct ExposureCheck {
    config: ExposureConfig,
}

impl ExposureCheck {
    /// Creates a new exposure check with the given configuration.
    #[must_use]
    pub const fn new(config: ExposureConfig) -> Self {
        Self { config }
    }
}

impl QualityCheck for ExposureCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Exposure
    }

    fn evaluate(&self, image: &ImageInfo) -> CheckOutcome {
        let (lower, upper) = tonal_bounds(
            image.luma(),
            self.config.lower_percentile,
            self.config.upper_percentile,
        );
        CheckOutcome {
            check: CheckKind::Exposure,
            passed: upper - lower > self.config.min_range,
            measurement: Measurement::Range { lower, upper },
        }
    }
}
