//! Synthetic image builders for testing.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use qualgate_core::domain::ImageInfo;

/// Dark, warm block color of [`SyntheticImageBuilder::good_photo`] (luma 88).
pub const GOOD_PHOTO_DARK: [u8; 3] = [160, 60, 40];
/// Light, warm block color of [`SyntheticImageBuilder::good_photo`] (luma 194).
pub const GOOD_PHOTO_LIGHT: [u8; 3] = [230, 190, 120];

/// Builder for creating synthetic test images.
///
/// Provides convenience methods for generating images with specific
/// characteristics (sharp, blurry, dull, noisy, etc.).
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    // === Sharp/High-Contrast Images ===

    /// Creates a black and white checkerboard with 8px cells.
    #[must_use]
    pub fn checkerboard(width: u32, height: u32) -> ImageInfo {
        Self::checkerboard_with_cell_size(width, height, 8)
    }

    /// Creates a black and white checkerboard with custom cell size.
    #[must_use]
    pub fn checkerboard_with_cell_size(width: u32, height: u32, cell_size: u32) -> ImageInfo {
        let img = GrayImage::from_fn(width, height, |x, y| {
            if (x / cell_size + y / cell_size) % 2 == 0 {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        ImageInfo::new("synthetic://checkerboard", DynamicImage::ImageLuma8(img))
    }

    /// Creates a two-color checkerboard of large blocks.
    #[must_use]
    pub fn color_blocks(
        width: u32,
        height: u32,
        block_size: u32,
        first: [u8; 3],
        second: [u8; 3],
    ) -> ImageInfo {
        let img = RgbImage::from_fn(width, height, |x, y| {
            if (x / block_size + y / block_size) % 2 == 0 {
                Rgb(first)
            } else {
                Rgb(second)
            }
        });
        ImageInfo::new("synthetic://color_blocks", DynamicImage::ImageRgb8(img))
    }

    /// A scene that passes every check: sharp block edges, mid brightness,
    /// warm saturated colors, no grain and a ~106 level tonal spread.
    #[must_use]
    pub fn good_photo(width: u32, height: u32) -> ImageInfo {
        Self::color_blocks(width, height, 64, GOOD_PHOTO_DARK, GOOD_PHOTO_LIGHT)
    }

    // === Blurry / Flat Images ===

    /// Creates a uniform gray image (no edges at all).
    #[must_use]
    pub fn uniform_gray(width: u32, height: u32, value: u8) -> ImageInfo {
        let img = GrayImage::from_fn(width, height, |_, _| Luma([value]));
        ImageInfo::new("synthetic://uniform_gray", DynamicImage::ImageLuma8(img))
    }

    /// Creates a gray horizontal ramp from `start` to just below `end`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn horizontal_gradient(width: u32, height: u32, start: u8, end: u8) -> ImageInfo {
        let span = u32::from(end.saturating_sub(start));
        let img = GrayImage::from_fn(width, height, |x, _| {
            let val = u32::from(start) + (span * x) / width.max(1);
            Luma([val as u8])
        });
        ImageInfo::new(
            "synthetic://horizontal_gradient",
            DynamicImage::ImageLuma8(img),
        )
    }

    /// A small, soft, colorless, low-contrast image: a 100-120 gray ramp.
    #[must_use]
    pub fn blurry_thumbnail(width: u32, height: u32) -> ImageInfo {
        Self::horizontal_gradient(width, height, 100, 120)
    }

    // === Noise ===

    /// Mid-gray image with deterministic pseudo-random grain of `+/- amplitude`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn noisy_gray(width: u32, height: u32, base: u8, amplitude: u8, seed: u64) -> ImageInfo {
        let mut state = seed | 1;
        let span = u64::from(amplitude) * 2 + 1;
        let img = GrayImage::from_fn(width, height, |_, _| {
            // xorshift64
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let offset = (state % span) as i32 - i32::from(amplitude);
            Luma([(i32::from(base) + offset).clamp(0, 255) as u8])
        });
        ImageInfo::new("synthetic://noisy_gray", DynamicImage::ImageLuma8(img))
    }

    // === Special Test Images ===

    /// Creates a 1x1 pixel image (edge case).
    #[must_use]
    pub fn single_pixel(value: u8) -> ImageInfo {
        let img = GrayImage::from_fn(1, 1, |_, _| Luma([value]));
        ImageInfo::new("synthetic://1x1", DynamicImage::ImageLuma8(img))
    }

    /// Creates a tiny 2x2 image.
    #[must_use]
    pub fn tiny(values: [[u8; 2]; 2]) -> ImageInfo {
        let mut img = GrayImage::new(2, 2);
        for (y, row) in values.iter().enumerate() {
            for (x, &val) in row.iter().enumerate() {
                #[allow(clippy::cast_possible_truncation)]
                img.put_pixel(x as u32, y as u32, Luma([val]));
            }
        }
        ImageInfo::new("synthetic://2x2", DynamicImage::ImageLuma8(img))
    }
}
