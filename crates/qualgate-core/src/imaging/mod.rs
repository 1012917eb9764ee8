//! Pixel-level building blocks: color conversion, 3x3 kernels and statistics.

mod filters;
mod histogram;
pub mod stats;

pub use filters::{gaussian_3x3, hsv_saturation, laplacian, luma_bt601, residual};
pub use histogram::Histogram;
