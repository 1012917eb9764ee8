//! Filesystem adapter for loading images.

use std::path::{Path, PathBuf};

use qualgate_core::{load_image, FormatAllowList, ImageInfo, ImageSource, LoadError};
use tracing::{debug, warn};

/// A path queued for loading.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Candidate {
    /// A file that should be decoded.
    File(PathBuf),
    /// A command-line path that does not exist.
    Missing(PathBuf),
}

/// Filesystem image source adapter.
///
/// Files named explicitly are always attempted, so a disallowed extension
/// surfaces as [`LoadError::UnsupportedFormat`]. Files discovered inside a
/// directory are only picked up when their extension is in the allow-list.
pub struct FsImageSource {
    paths: Vec<PathBuf>,
    recursive: bool,
    formats: FormatAllowList,
}

impl FsImageSource {
    /// Creates a new filesystem image source.
    ///
    /// # Arguments
    ///
    /// * `paths` - Files or directories to scan
    /// * `recursive` - Whether to recurse into subdirectories
    /// * `formats` - Extensions accepted by the loader
    #[must_use]
    pub const fn new(paths: Vec<PathBuf>, recursive: bool, formats: FormatAllowList) -> Self {
        Self {
            paths,
            recursive,
            formats,
        }
    }

    /// Resolves the configured paths into load candidates, in a stable order.
    fn collect(&self) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for path in &self.paths {
            if path.is_dir() {
                self.collect_from_dir(path, &mut candidates);
            } else if path.exists() {
                candidates.push(Candidate::File(path.clone()));
            } else {
                warn!("Path does not exist: {}", path.display());
                candidates.push(Candidate::Missing(path.clone()));
            }
        }

        candidates
    }

    fn collect_from_dir(&self, dir: &Path, candidates: &mut Vec<Candidate>) {
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to read directory {}: {e}", dir.display());
                return;
            }
        };

        let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
        paths.sort();

        for path in paths {
            if path.is_file() && self.formats.allows(&path) {
                candidates.push(Candidate::File(path));
            } else if path.is_dir() && self.recursive {
                self.collect_from_dir(&path, candidates);
            }
        }
    }
}

impl ImageSource for FsImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = Result<ImageInfo, LoadError>> + Send + '_> {
        let candidates = self.collect();
        debug!("Found {} candidate files", candidates.len());

        Box::new(candidates.into_iter().map(|candidate| match candidate {
            Candidate::File(path) => load_image(&path, &self.formats),
            Candidate::Missing(path) => Err(LoadError::NotFound { path }),
        }))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.collect().len())
    }
}
