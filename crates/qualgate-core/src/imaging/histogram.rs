//! 256-bin histogram of 8-bit samples.

use image::GrayImage;

/// 256-bin histogram of 8-bit values.
#[derive(Debug, Clone)]
pub struct Histogram {
    bins: [u64; 256],
    total: u64,
}

impl Histogram {
    /// Compute histogram from a single-channel image.
    #[must_use]
    pub fn from_luma(image: &GrayImage) -> Self {
        let mut bins = [0u64; 256];
        for &value in image.as_raw() {
            bins[usize::from(value)] += 1;
        }
        let total = bins.iter().sum();
        Self { bins, total }
    }

    /// Returns the total sample count.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Calculate the arithmetic mean.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let sum: u64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(i, &count)| (i as u64) * count)
            .sum();
        sum as f64 / self.total as f64
    }

    /// Value of the `rank`-th smallest sample (0-based).
    ///
    /// Ranks past the end return the largest sample.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn value_at_rank(&self, rank: u64) -> u8 {
        let mut cumulative = 0u64;
        let mut last = 0u8;
        for (i, &count) in self.bins.iter().enumerate() {
            if count == 0 {
                continue;
            }
            // Safe: i is always 0-255 (bin index)
            last = i as u8;
            cumulative += count;
            if cumulative > rank {
                return last;
            }
        }
        last
    }

    /// Percentile with linear interpolation between order statistics.
    ///
    /// `percent` is on the 0-100 scale and clamped to it. The virtual index is
    /// `percent / 100 * (n - 1)`; the result interpolates between the samples
    /// at its floor and ceiling.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    #[must_use]
    pub fn percentile(&self, percent: f64) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let fraction = percent.clamp(0.0, 100.0) / 100.0;
        let position = fraction * (self.total - 1) as f64;
        let lower_rank = position.floor();
        let weight = position - lower_rank;

        let lower = f64::from(self.value_at_rank(lower_rank as u64));
        if weight.abs() < f64::EPSILON {
            return lower;
        }
        let upper = f64::from(self.value_at_rank(lower_rank as u64 + 1));
        lower + (upper - lower) * weight
    }
}

#[cfg(test)]
#[allow(clippy::cast_possible_truncation)]
mod tests {
    use super::*;
    use image::Luma;

    fn ramp(n: u32) -> GrayImage {
        GrayImage::from_fn(n, 1, |x, _| Luma([x as u8]))
    }

    #[test]
    fn test_histogram_from_ramp() {
        let hist = Histogram::from_luma(&ramp(256));
        assert_eq!(hist.total(), 256);
        assert!(hist.bins.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_mean_uniform() {
        let img = GrayImage::from_fn(100, 100, |_, _| Luma([128u8]));
        let hist = Histogram::from_luma(&img);
        assert!((hist.mean() - 128.0).abs() < 1e-12);
    }

    #[test]
    fn test_value_at_rank() {
        let img = GrayImage::from_raw(5, 1, vec![9, 3, 3, 7, 1]).unwrap_or_default();
        let hist = Histogram::from_luma(&img);
        let sorted: Vec<u8> = (0..5).map(|r| hist.value_at_rank(r)).collect();
        assert_eq!(sorted, vec![1, 3, 3, 7, 9]);
        assert_eq!(hist.value_at_rank(99), 9);
    }

    #[test]
    fn test_percentile_linear_interpolation() {
        // Samples 0..=99: index = p/100 * 99.
        let hist = Histogram::from_luma(&ramp(100));
        assert!((hist.percentile(5.0) - 4.95).abs() < 1e-9);
        assert!((hist.percentile(95.0) - 94.05).abs() < 1e-9);
        assert!((hist.percentile(50.0) - 49.5).abs() < 1e-9);
    }

    #[test]
    fn test_percentile_endpoints() {
        let hist = Histogram::from_luma(&ramp(256));
        assert!((hist.percentile(0.0) - 0.0).abs() < f64::EPSILON);
        assert!((hist.percentile(100.0) - 255.0).abs() < f64::EPSILON);
        assert!((hist.percentile(150.0) - 255.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percentile_two_levels() {
        // Half 80, half 180: p5 and p95 sit on the plateaus.
        let img = GrayImage::from_fn(100, 10, |x, _| Luma([if x < 50 { 80 } else { 180 }]));
        let hist = Histogram::from_luma(&img);
        assert!((hist.percentile(5.0) - 80.0).abs() < f64::EPSILON);
        assert!((hist.percentile(95.0) - 180.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_histogram() {
        let hist = Histogram {
            bins: [0u64; 256],
            total: 0,
        };
        assert!((hist.percentile(50.0) - 0.0).abs() < f64::EPSILON);
        assert!((hist.mean() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_sample() {
        let img = GrayImage::from_pixel(1, 1, Luma([42]));
        let hist = Histogram::from_luma(&img);
        assert!((hist.percentile(5.0) - 42.0).abs() < f64::EPSILON);
        assert!((hist.percentile(95.0) - 42.0).abs() < f64::EPSILON);
    }
}
