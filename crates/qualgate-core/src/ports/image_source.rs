//! Image source port for loading images from various sources.

use crate::domain::{ImageInfo, LoadError};

/// Port for loading images from a source.
pub trait ImageSource: Send + Sync {
    /// Returns an iterator over images from this source.
    ///
    /// Items that fail to load carry the [`LoadError`] describing why; the
    /// remaining items are still yielded.
    fn images(&self) -> Box<dyn Iterator<Item = Result<ImageInfo, LoadError>> + Send + '_>;

    /// Returns the total number of images, if known.
    fn count_hint(&self) -> Option<usize>;
}
