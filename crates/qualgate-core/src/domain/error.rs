//! Image loading errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while constructing a quality engine from a file.
///
/// These are the only failures in the crate; once an image is loaded every
/// check is infallible.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The path does not resolve to a regular file.
    #[error("Image not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file extension is outside the configured allow-list.
    #[error("Unsupported file type '{extension}': {}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// The bytes could not be decoded into a color bitmap.
    #[error("Failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl LoadError {
    /// Path of the file that failed to load.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound { path }
            | Self::UnsupportedFormat { path, .. }
            | Self::Decode { path, .. } => path,
        }
    }
}

/// Result type for image loading.
pub type LoadResult<T> = Result<T, LoadError>;
