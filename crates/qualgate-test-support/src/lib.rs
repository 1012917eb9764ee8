//! Test support utilities for qualgate.
//!
//! Provides port mocks and synthetic image builders for exercising the
//! quality engine and the batch pipeline without fixture files.
//!
//! # Example
//!
//! ```
//! use qualgate_test_support::{MockImageSource, SyntheticImageBuilder};
//!
//! let sharp = SyntheticImageBuilder::good_photo(640, 640);
//! let soft = SyntheticImageBuilder::blurry_thumbnail(320, 240);
//!
//! let source = MockImageSource::new(vec![sharp, soft]).with_missing("gone.jpg");
//! ```

mod builders;
mod mocks;

pub use builders::{SyntheticImageBuilder, GOOD_PHOTO_DARK, GOOD_PHOTO_LIGHT};
pub use mocks::{MockImageSource, MockProgressSink, MockReportOutput};
