//! Pixel kernels shared by the quality checks.
//!
//! All neighbourhood operations use reflect-101 borders
//! (`gfedcb|abcdefgh|gfedcba`): the edge pixel itself is not repeated.

use image::{GrayImage, Luma, RgbImage};

const LUMA_SHIFT: u32 = 14;
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;

const HSV_SHIFT: u32 = 12;

/// Converts RGB to 8-bit BT.601 luminance using 14-bit fixed point.
///
/// The coefficients sum to `1 << 14`, so a gray pixel `(v, v, v)` maps to `v`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn luma_bt601(rgb: &RgbImage) -> GrayImage {
    let (width, height) = rgb.dimensions();
    let mut out = GrayImage::new(width, height);
    for (src, dst) in rgb.pixels().zip(out.pixels_mut()) {
        let [r, g, b] = src.0;
        let y = (u32::from(r) * LUMA_R
            + u32::from(g) * LUMA_G
            + u32::from(b) * LUMA_B
            + (1 << (LUMA_SHIFT - 1)))
            >> LUMA_SHIFT;
        // Max is 255 because the weights sum to 1 << 14.
        *dst = Luma([y as u8]);
    }
    out
}

/// Maps an out-of-range index back into `0..len` by reflect-101.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn reflect101(index: i64, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let len = len as i64;
    let reflected = if index < 0 {
        -index
    } else if index >= len {
        2 * len - 2 - index
    } else {
        index
    };
    reflected as usize
}

/// Row-major neighbour lookup table for offsets `-1, 0, +1` along one axis.
fn neighbours(len: usize) -> Vec<[usize; 3]> {
    (0..len)
        .map(|i| {
            #[allow(clippy::cast_possible_wrap)]
            let i = i as i64;
            [
                reflect101(i - 1, len),
                reflect101(i, len),
                reflect101(i + 1, len),
            ]
        })
        .collect()
}

/// Applies the 4-neighbour Laplacian `[[0,1,0],[1,-4,1],[0,1,0]]`.
///
/// Returns one signed response per pixel, row-major.
#[must_use]
pub fn laplacian(luma: &GrayImage) -> Vec<i32> {
    let (width, height) = (luma.width() as usize, luma.height() as usize);
    let px = luma.as_raw();
    let cols = neighbours(width);
    let rows = neighbours(height);

    let mut response = Vec::with_capacity(width * height);
    for [up, y, down] in &rows {
        let row = &px[y * width..(y + 1) * width];
        let row_up = &px[up * width..(up + 1) * width];
        let row_down = &px[down * width..(down + 1) * width];
        for [left, x, right] in &cols {
            let center = i32::from(row[*x]);
            let sum = i32::from(row[*left])
                + i32::from(row[*right])
                + i32::from(row_up[*x])
                + i32::from(row_down[*x]);
            response.push(sum - 4 * center);
        }
    }
    response
}

/// Smooths with the 3x3 Gaussian `[1,2,1]^T [1,2,1] / 16`, rounding half up.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn gaussian_3x3(luma: &GrayImage) -> GrayImage {
    let (w, h) = luma.dimensions();
    let (width, height) = (w as usize, h as usize);
    let px = luma.as_raw();
    let cols = neighbours(width);
    let rows = neighbours(height);

    // Horizontal pass keeps the full 0..=1020 range.
    let mut horizontal = vec![0u16; width * height];
    for y in 0..height {
        let row = &px[y * width..(y + 1) * width];
        let out = &mut horizontal[y * width..(y + 1) * width];
        for (dst, [left, x, right]) in out.iter_mut().zip(&cols) {
            *dst = u16::from(row[*left]) + 2 * u16::from(row[*x]) + u16::from(row[*right]);
        }
    }

    let mut smoothed = Vec::with_capacity(width * height);
    for [up, y, down] in &rows {
        for x in 0..width {
            let sum = u32::from(horizontal[up * width + x])
                + 2 * u32::from(horizontal[y * width + x])
                + u32::from(horizontal[down * width + x]);
            // sum <= 4080, so the rounded quotient fits in u8.
            smoothed.push(((sum + 8) >> 4) as u8);
        }
    }

    GrayImage::from_raw(w, h, smoothed).unwrap_or_else(|| GrayImage::new(w, h))
}

/// Signed difference `original - smoothed`, one value per pixel.
///
/// Computed in `i16`: the 8-bit inputs would wrap around on subtraction.
#[must_use]
pub fn residual(original: &GrayImage, smoothed: &GrayImage) -> Vec<i16> {
    original
        .as_raw()
        .iter()
        .zip(smoothed.as_raw())
        .map(|(&o, &s)| i16::from(o) - i16::from(s))
        .collect()
}

/// Lookup table for `(255 << 12) / v`, rounded.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn saturation_divisors() -> [u32; 256] {
    let mut table = [0u32; 256];
    for (v, slot) in table.iter_mut().enumerate().skip(1) {
        *slot = (f64::from(255u32 << HSV_SHIFT) / v as f64).round() as u32;
    }
    table
}

/// HSV saturation channel on the 0-255 scale.
///
/// `S = 255 * (max - min) / max`, zero for black pixels, in 12-bit fixed point.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn hsv_saturation(rgb: &RgbImage) -> GrayImage {
    let divisors = saturation_divisors();
    let (width, height) = rgb.dimensions();
    let mut out = GrayImage::new(width, height);
    for (src, dst) in rgb.pixels().zip(out.pixels_mut()) {
        let [r, g, b] = src.0;
        let v = r.max(g).max(b);
        let diff = u32::from(v - r.min(g).min(b));
        let s = (diff * divisors[usize::from(v)] + (1 << (HSV_SHIFT - 1))) >> HSV_SHIFT;
        *dst = Luma([s.min(255) as u8]);
    }
    out
}
