//! The quality engine: one decoded image, six checks, one report.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::error::{DecodingError, ImageFormatHint, LimitError, LimitErrorKind};
use image::{ImageError, ImageFormat, ImageReader};
use tracing::debug;

use crate::domain::{
    path_extension, CheckOutcome, FormatAllowList, ImageInfo, LoadError, LoadResult,
    QualityCheck, QualityReport, SCORED_CHECKS,
};
use crate::modules::{
    laplacian_variance, mean_luminance, mean_saturation, noise_level, tonal_bounds, BlurCheck,
    BlurConfig, BrightnessCheck, BrightnessConfig, ExposureCheck, ExposureConfig, NoiseCheck,
    NoiseConfig, ResolutionCheck, ResolutionConfig, SaturationCheck, SaturationConfig,
};

/// Thresholds for every check, each defaulting to the standard values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QualityConfig {
    /// Minimum dimensions (reported, not scored).
    pub resolution: ResolutionConfig,
    /// Laplacian variance threshold.
    pub blur: BlurConfig,
    /// Mean luminance bounds.
    pub brightness: BrightnessConfig,
    /// Mean saturation threshold.
    pub saturation: SaturationConfig,
    /// Residual standard deviation threshold.
    pub noise: NoiseConfig,
    /// Percentiles and minimum tonal range.
    pub exposure: ExposureConfig,
}

impl QualityConfig {
    /// The five scored checks, in report order.
    #[must_use]
    pub fn scored_checks(&self) -> [Box<dyn QualityCheck>; SCORED_CHECKS as usize] {
        [
            Box::new(BlurCheck::new(self.blur)),
            Box::new(BrightnessCheck::new(self.brightness)),
            Box::new(SaturationCheck::new(self.saturation)),
            Box::new(NoiseCheck::new(self.noise)),
            Box::new(ExposureCheck::new(self.exposure)),
        ]
    }
}

/// Loads and validates an image file.
///
/// # Errors
///
/// - [`LoadError::NotFound`] if `path` is not a regular file
/// - [`LoadError::UnsupportedFormat`] if its extension is not in `formats`
/// - [`LoadError::Decode`] if the contents are not a decodable, non-empty bitmap
pub fn load_image(path: &Path, formats: &FormatAllowList) -> LoadResult<ImageInfo> {
    if !path.is_file() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let extension = path_extension(path).unwrap_or_default();
    if !formats.allows_extension(&extension) {
        return Err(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        });
    }

    let decode_error = |source: ImageError| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let bytes = fs::read(path).map_err(|e| decode_error(ImageError::IoError(e)))?;

    // Sniff the format from the bytes; the extension only gates admission.
    let reader = ImageReader::new(Cursor::new(bytes.as_slice()))
        .with_guessed_format()
        .map_err(|e| decode_error(ImageError::IoError(e)))?;

    // The JPEG decoder pads a cut-off scan instead of failing.
    if reader.format() == Some(ImageFormat::Jpeg) && !jpeg_is_complete(&bytes) {
        return Err(decode_error(ImageError::Decoding(DecodingError::new(
            ImageFormatHint::Exact(ImageFormat::Jpeg),
            "stream ends before the end-of-image marker",
        ))));
    }

    let image = reader.decode().map_err(decode_error)?;

    if image.width() == 0 || image.height() == 0 {
        return Err(decode_error(ImageError::Limits(LimitError::from_kind(
            LimitErrorKind::DimensionError,
        ))));
    }

    debug!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );

    Ok(ImageInfo::new(path.to_string_lossy(), image))
}

/// True if a JPEG stream ends with the EOI marker, ignoring trailing zero padding.
fn jpeg_is_complete(bytes: &[u8]) -> bool {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    bytes[..end].ends_with(&[0xFF, 0xD9])
}

/// Assesses a single image.
///
/// The image is decoded once and never modified; every check and every call
/// to [`classify_quality`](Self::classify_quality) reads the same pixels.
#[derive(Debug, Clone)]
pub struct QualityEngine {
    image: ImageInfo,
}

impl QualityEngine {
    /// Opens and decodes an image file.
    ///
    /// # Errors
    ///
    /// See [`load_image`].
    pub fn open(path: impl AsRef<Path>, formats: &FormatAllowList) -> LoadResult<Self> {
        load_image(path.as_ref(), formats).map(Self::from_image)
    }

    /// Wraps an already decoded image.
    #[must_use]
    pub const fn from_image(image: ImageInfo) -> Self {
        Self { image }
    }

    /// The loaded image.
    #[must_use]
    pub const fn image(&self) -> &ImageInfo {
        &self.image
    }

    /// True if the image is at least `min_width` x `min_height`.
    #[must_use]
    pub fn check_resolution(&self, min_width: u32, min_height: u32) -> bool {
        ResolutionCheck::new(ResolutionConfig {
            min_width,
            min_height,
        })
        .evaluate(&self.image)
        .passed
    }

    /// Variance of the Laplacian of the luminance plane.
    #[must_use]
    pub fn estimate_blur(&self) -> f64 {
        laplacian_variance(self.image.luma())
    }

    /// True if [`estimate_blur`](Self::estimate_blur) is at least `threshold`.
    #[must_use]
    pub fn check_blurriness(&self, threshold: f64) -> bool {
        self.estimate_blur() >= threshold
    }

    /// True if the mean luminance lies strictly between the bounds.
    #[must_use]
    pub fn check_brightness(&self, lower: f64, upper: f64) -> bool {
        let mean = mean_luminance(self.image.luma());
        lower < mean && mean < upper
    }

    /// True if the mean HSV saturation exceeds `threshold`.
    #[must_use]
    pub fn check_saturation(&self, threshold: f64) -> bool {
        mean_saturation(self.image.rgb()) > threshold
    }

    /// Standard deviation of the luminance minus its 3x3 Gaussian blur.
    #[must_use]
    pub fn estimate_noise(&self) -> f64 {
        noise_level(self.image.luma())
    }

    /// True if [`estimate_noise`](Self::estimate_noise) is at most `threshold`.
    #[must_use]
    pub fn check_noise(&self, threshold: f64) -> bool {
        self.estimate_noise() <= threshold
    }

    /// True if the spread between the two luminance percentiles exceeds the
    /// default minimum tonal range.
    #[must_use]
    pub fn check_exposure(&self, lower_percentile: f64, upper_percentile: f64) -> bool {
        let (lower, upper) = tonal_bounds(self.image.luma(), lower_percentile, upper_percentile);
        upper - lower > ExposureConfig::default().min_range
    }

    /// Runs every check with default thresholds.
    #[must_use]
    pub fn classify_quality(&self) -> QualityReport {
        self.classify_quality_with(&QualityConfig::default())
    }

    /// Runs every check with the given thresholds.
    ///
    /// All five scored checks always run; a failure never short-circuits
    /// the rest.
    #[must_use]
    pub fn classify_quality_with(&self, config: &QualityConfig) -> QualityReport {
        let resolution = ResolutionCheck::new(config.resolution).evaluate(&self.image);
        let outcomes: Vec<CheckOutcome> = config
            .scored_checks()
            .iter()
            .map(|check| check.evaluate(&self.image))
            .collect();

        let report = QualityReport::from_outcomes(self.image.path.clone(), resolution, &outcomes);
        debug!(
            "{}: {}/{} checks passed, resolution {}",
            report.image_path,
            report.tests_passed,
            report.total_tests,
            if report.resolution_passed { "ok" } else { "low" }
        );
        report
    }
}
