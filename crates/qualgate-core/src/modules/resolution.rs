//! Minimum resolution check.
//!
//! Reported with every assessment but never counted toward the score.

use crate::domain::{CheckKind, CheckOutcome, ImageInfo, Measurement, QualityCheck};

/// Configuration for the resolution check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionConfig {
    /// Minimum accepted width in pixels (inclusive).
    pub min_width: u32,
    /// Minimum accepted height in pixels (inclusive).
    pub min_height: u32,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            min_width: 600,
            min_height: 600,
        }
    }
}

/// Resolution check.
#[derive(Debug, Clone, Default)]
pub struct ResolutionCheck {
    config: ResolutionConfig,
}

impl ResolutionCheck {
    /// Creates a resolution check with the given minimums.
    #[must_use]
    pub const fn new(config: ResolutionConfig) -> Self {
        Self { config }
    }
}

impl QualityCheck for ResolutionCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Resolution
    }

    fn evaluate(&self, image: &ImageInfo) -> CheckOutcome {
        CheckOutcome {
            check: CheckKind::Resolution,
            passed: image.width >= self.config.min_width
                && image.height >= self.config.min_height,
            measurement: Measurement::Dimensions {
                width: image.width,
                height: image.height,
            },
        }
    }
}
