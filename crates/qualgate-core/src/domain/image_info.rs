//! Decoded image held by the quality engine.

use image::{DynamicImage, GenericImageView, GrayImage, RgbImage};

use crate::imaging::luma_bt601;

/// A decoded 3-channel bitmap plus its luminance plane.
///
/// Both planes are computed once at construction and never mutated, so every
/// check reads the same pixels.
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Identifier of the source (file path or synthetic name).
    pub path: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    rgb: RgbImage,
    luma: GrayImage,
}

impl ImageInfo {
    /// Wraps a decoded image, converting it to 8-bit RGB.
    #[must_use]
    pub fn new(path: impl Into<String>, image: DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        let rgb = image.into_rgb8();
        let luma = luma_bt601(&rgb);
        Self {
            path: path.into(),
            width,
            height,
            rgb,
            luma,
        }
    }

    /// Color pixels.
    #[must_use]
    pub const fn rgb(&self) -> &RgbImage {
        &self.rgb
    }

    /// Single-channel luminance pixels.
    #[must_use]
    pub const fn luma(&self) -> &GrayImage {
        &self.luma
    }
}
