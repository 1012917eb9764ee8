//! Color saturation check.

use image::RgbImage;

use crate::domain::{CheckKind, CheckOutcome, ImageInfo, Measurement, QualityCheck};
use crate::imaging::{hsv_saturation, Histogram};

/// Configuration for the saturation check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaturationConfig {
    /// Mean HSV saturation (0-255) must exceed this value.
    pub threshold: f64,
}

impl Default for SaturationConfig {
    fn default() -> Self {
        Self { threshold: 20.0 }
    }
}

/// Mean of the 8-bit HSV saturation channel.
#[must_use]
pub fn mean_saturation(rgb: &RgbImage) -> f64 {
    Histogram::from_luma(&hsv_saturation(rgb)).mean()
}

/// Saturation check.
#[derive(Debug, Clone, Default)]
pub struct SaturationCheck {
    config: SaturationConfig,
}

impl SaturationCheck {
    /// Creates a new saturation check.
    #[must_use]
    pub const fn new(config: SaturationConfig) -> Self {
        Self { config }
    }
}

impl QualityCheck for SaturationCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Saturation
    }

    fn evaluate(&self, image: &ImageInfo) -> CheckOutcome {
        let mean = mean_saturation(image.rgb());
        CheckOutcome {
            check: CheckKind::Saturation,
            passed: mean > self.config.threshold,
            measurement: Measurement::Value { value: mean },
        }
    }
}
