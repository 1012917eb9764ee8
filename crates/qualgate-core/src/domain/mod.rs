//! Core domain types for image quality assessment.

mod check;
mod error;
mod format;
mod image_info;
mod report;

pub use check::QualityCheck;
pub use error::{LoadError, LoadResult};
pub use format::{FormatAllowList, DEFAULT_EXTENSIONS};
pub(crate) use format::path_extension;
pub use image_info::ImageInfo;
pub use report::{CheckKind, CheckOutcome, Measurement, QualityReport, SCORED_CHECKS};
