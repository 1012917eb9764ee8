//! Quality check implementations.
//!
//! Each module implements the `QualityCheck` trait for one signal.

mod blur;
mod brightness;
mod exposure;
mod noise;
mod resolution;
mod saturation;

pub use blur::{laplacian_variance, BlurCheck, BlurConfig};
pub use brightness::{mean_luminance, BrightnessCheck, BrightnessConfig};
pub use exposure::{tonal_bounds, ExposureCheck, ExposureConfig};
pub use noise::{noise_level, NoiseCheck, NoiseConfig};
pub use resolution::{ResolutionCheck, ResolutionConfig};
pub use saturation::{mean_saturation, SaturationCheck, SaturationConfig};
