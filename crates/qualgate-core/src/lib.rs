//! Qualgate Core - Domain logic and quality checks
//!
//! This crate decides from pixel data alone whether a photo is usable:
//! it loads one image, runs the resolution, blur, brightness, saturation,
//! noise and exposure checks, and folds them into a [`QualityReport`].
//!
//! ```no_run
//! use qualgate_core::{FormatAllowList, QualityEngine};
//!
//! let engine = QualityEngine::open("photo.jpg", &FormatAllowList::default())?;
//! let report = engine.classify_quality();
//! println!("{} scored {:.1}", report.image_path, report.quality_score);
//! # Ok::<(), qualgate_core::LoadError>(())
//! ```

pub mod domain;
pub mod engine;
pub mod imaging;
pub mod modules;
pub mod ports;

pub use domain::{
    CheckKind, CheckOutcome, FormatAllowList, ImageInfo, LoadError, LoadResult, Measurement,
    QualityCheck, QualityReport, DEFAULT_EXTENSIONS, SCORED_CHECKS,
};
pub use engine::{load_image, QualityConfig, QualityEngine};
pub use modules::{
    BlurConfig, BrightnessConfig, ExposureConfig, NoiseConfig, ResolutionConfig, SaturationConfig,
};
pub use ports::{ImageSource, ProgressEvent, ProgressSink, ReportOutput};
