//! Quality report types.

use serde::{Deserialize, Serialize};

/// Number of checks that contribute to the quality score.
///
/// Resolution is reported alongside but never counted.
pub const SCORED_CHECKS: u32 = 5;

/// Identifies a quality check.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Minimum width and height.
    Resolution,
    /// Variance of the Laplacian (sharpness).
    Blur,
    /// Mean luminance within bounds.
    Brightness,
    /// Mean HSV saturation.
    Saturation,
    /// Residual against a Gaussian-smoothed copy.
    Noise,
    /// Spread between luminance percentiles.
    Exposure,
}

impl CheckKind {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resolution => "resolution",
            Self::Blur => "blur",
            Self::Brightness => "brightness",
            Self::Saturation => "saturation",
            Self::Noise => "noise",
            Self::Exposure => "exposure",
        }
    }

    /// Whether this check counts toward `tests_passed`.
    #[must_use]
    pub const fn is_scored(self) -> bool {
        !matches!(self, Self::Resolution)
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw measurement behind a check verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    /// Image dimensions in pixels.
    Dimensions { width: u32, height: u32 },
    /// A single statistic (variance, mean, standard deviation).
    Value { value: f64 },
    /// A pair of percentile values.
    Range { lower: f64, upper: f64 },
}

/// Outcome of one check on one image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Which check produced this outcome.
    pub check: CheckKind,
    /// Whether the image passed.
    pub passed: bool,
    /// The measurement the verdict was derived from.
    pub measurement: Measurement,
}

/// Aggregate quality verdict for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Source identifier of the analyzed image.
    pub image_path: String,
    /// `tests_passed / total_tests`, in `[0, 1]`.
    pub quality_score: f64,
    /// Number of scored checks that passed.
    pub tests_passed: u32,
    /// Number of scored checks; always [`SCORED_CHECKS`].
    pub total_tests: u32,
    /// Resolution verdict, reported but not scored.
    pub resolution_passed: bool,
    /// Per-check outcomes, including resolution. Empty when stripped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<CheckOutcome>,
}

impl QualityReport {
    /// Builds a report from the resolution outcome and the scored outcomes.
    ///
    /// Outcomes of non-scored kinds in `scored` are ignored for counting.
    #[must_use]
    pub fn from_outcomes(
        image_path: impl Into<String>,
        resolution: CheckOutcome,
        scored: &[CheckOutcome],
    ) -> Self {
        let passed = scored
            .iter()
            .filter(|o| o.check.is_scored() && o.passed)
            .count();
        let tests_passed = u32::try_from(passed)
            .unwrap_or(SCORED_CHECKS)
            .min(SCORED_CHECKS);

        let mut checks = Vec::with_capacity(scored.len() + 1);
        checks.push(resolution);
        checks.extend_from_slice(scored);

        Self {
            image_path: image_path.into(),
            quality_score: f64::from(tests_passed) / f64::from(SCORED_CHECKS),
            tests_passed,
            total_tests: SCORED_CHECKS,
            resolution_passed: resolution.passed,
            checks,
        }
    }

    /// Drops per-check details, leaving the summary fields.
    #[must_use]
    pub fn without_details(mut self) -> Self {
        self.checks.clear();
        self
    }

    /// Looks up the outcome of a single check, if details are present.
    #[must_use]
    pub fn outcome(&self, check: CheckKind) -> Option<&CheckOutcome> {
        self.checks.iter().find(|o| o.check == check)
    }

    /// Names of the scored checks that failed.
    #[must_use]
    pub fn failed_checks(&self) -> Vec<CheckKind> {
        self.checks
            .iter()
            .filter(|o| o.check.is_scored() && !o.passed)
            .map(|o| o.check)
            .collect()
    }

    /// True when the score reaches `min_score` and resolution passed.
    #[must_use]
    pub fn meets(&self, min_score: f64) -> bool {
        self.resolution_passed && self.quality_score >= min_score
    }
}
