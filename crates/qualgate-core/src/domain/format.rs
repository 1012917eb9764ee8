//! Accepted input file formats.

use std::path::Path;

/// Extensions accepted when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Allow-list of file extensions the engine agrees to open.
///
/// Entries are stored lowercase without a leading dot, so `".JPG"`, `"jpg"`
/// and `"Jpg"` all name the same format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatAllowList {
    extensions: Vec<String>,
}

impl FormatAllowList {
    /// Builds an allow-list from arbitrary extension spellings.
    ///
    /// Blank entries are dropped and duplicates collapsed.
    #[must_use]
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = normalize(ext.as_ref());
            if !ext.is_empty() && !normalized.contains(&ext) {
                normalized.push(ext);
            }
        }
        Self {
            extensions: normalized,
        }
    }

    /// Parses a comma-separated list such as `".jpg,.jpeg,.png"`.
    #[must_use]
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// Returns the normalized extensions.
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Returns true if no extension is allowed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Checks a bare extension (with or without leading dot).
    #[must_use]
    pub fn allows_extension(&self, extension: &str) -> bool {
        let ext = normalize(extension);
        self.extensions.iter().any(|e| *e == ext)
    }

    /// Checks the extension of a path. Paths without an extension are rejected.
    #[must_use]
    pub fn allows(&self, path: &Path) -> bool {
        path_extension(path).is_some_and(|e| self.allows_extension(&e))
    }
}

impl Default for FormatAllowList {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}

/// Lowercased extension of a path, without the dot.
pub(crate) fn path_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

fn normalize(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allows_jpg_jpeg_png() {
        let formats = FormatAllowList::default();
        assert!(formats.allows(Path::new("a.jpg")));
        assert!(formats.allows(Path::new("a.JPEG")));
        assert!(formats.allows(Path::new("dir/a.png")));
        assert!(!formats.allows(Path::new("a.bmp")));
        assert!(!formats.allows(Path::new("a.tiff")));
        assert!(!formats.allows(Path::new("noext")));
    }

    #[test]
    fn test_parse_normalizes_dots_and_case() {
        let formats = FormatAllowList::parse(" .JPG, png ,,.Webp");
        assert_eq!(formats.extensions(), ["jpg", "png", "webp"]);
        assert!(formats.allows_extension(".webp"));
        assert!(!formats.allows_extension("jpeg"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let formats = FormatAllowList::new([".png", "PNG", "png"]);
        assert_eq!(formats.extensions().len(), 1);
    }

    #[test]
    fn test_empty_list() {
        let formats = FormatAllowList::parse("");
        assert!(formats.is_empty());
        assert!(!formats.allows(Path::new("a.jpg")));
    }
}
