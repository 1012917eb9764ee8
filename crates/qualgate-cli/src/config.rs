//! Configuration file support for qualgate.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/qualgate/config.toml` (lowest priority)
//! - Project-local: `.qualgate.toml` (searched up directory tree)
//! - Environment and CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Accepted file formats.
    pub formats: FormatsConfig,
    /// Minimum dimensions.
    pub resolution: ResolutionConfig,
    /// Blur detection settings.
    pub blur: ThresholdConfig,
    /// Brightness bounds.
    pub brightness: BrightnessConfig,
    /// Saturation settings.
    pub saturation: ThresholdConfig,
    /// Noise settings.
    pub noise: ThresholdConfig,
    /// Exposure analysis settings.
    pub exposure: ExposureConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Format allow-list configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct FormatsConfig {
    /// Accepted extensions, with or without a leading dot.
    pub allowed_extensions: Option<Vec<String>>,
}

/// Resolution configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Minimum width in pixels.
    pub min_width: Option<u32>,
    /// Minimum height in pixels.
    pub min_height: Option<u32>,
}

/// Single-threshold check configuration (blur, saturation, noise).
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Pass/fail threshold.
    pub threshold: Option<f64>,
}

/// Brightness configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct BrightnessConfig {
    /// Exclusive lower bound on mean luminance.
    pub lower: Option<f64>,
    /// Exclusive upper bound on mean luminance.
    pub upper: Option<f64>,
}

/// Exposure configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ExposureConfig {
    /// Lower luminance percentile (0-100).
    pub lower_percentile: Option<f64>,
    /// Upper luminance percentile (0-100).
    pub upper_percentile: Option<f64>,
    /// Minimum spread between the two percentiles.
    pub min_range: Option<f64>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Include per-check measurements.
    pub details: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
    /// Minimum quality score for a zero exit status.
    pub min_score: Option<f64>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/qualgate/config.toml`
    /// 2. Project-local: `.qualgate.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        for problem in config.validate() {
            eprintln!("warning: {problem}");
        }

        config
    }

    /// Lists values that are out of range or inconsistent.
    ///
    /// Problems are reported, never fatal: the run continues with what was given.
    fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let thresholds = [
            ("blur.threshold", self.blur.threshold),
            ("saturation.threshold", self.saturation.threshold),
            ("noise.threshold", self.noise.threshold),
            ("exposure.min_range", self.exposure.min_range),
        ];
        for (name, value) in thresholds {
            if let Some(t) = value.filter(|t| *t < 0.0) {
                problems.push(format!("{name} must not be negative, got {t}"));
            }
        }

        if let (Some(lower), Some(upper)) = (self.brightness.lower, self.brightness.upper) {
            if lower >= upper {
                problems.push(format!(
                    "brightness.lower ({lower}) must be below brightness.upper ({upper})"
                ));
            }
        }

        for (name, value) in [
            ("exposure.lower_percentile", self.exposure.lower_percentile),
            ("exposure.upper_percentile", self.exposure.upper_percentile),
        ] {
            if let Some(p) = value.filter(|p| !(0.0..=100.0).contains(p)) {
                problems.push(format!("{name} must be 0-100, got {p}"));
            }
        }
        if let (Some(lower), Some(upper)) = (
            self.exposure.lower_percentile,
            self.exposure.upper_percentile,
        ) {
            if lower >= upper {
                problems.push(format!(
                    "exposure.lower_percentile ({lower}) must be below \
                     exposure.upper_percentile ({upper})"
                ));
            }
        }

        if let Some(ref extensions) = self.formats.allowed_extensions {
            if extensions.iter().all(|e| e.trim().trim_start_matches('.').is_empty()) {
                problems.push("formats.allowed_extensions is empty; no file can be loaded".into());
            }
        }

        if let Some(s) = self.output.min_score.filter(|s| !(0.0..=1.0).contains(s)) {
            problems.push(format!("output.min_score must be 0.0-1.0, got {s}"));
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                problems.push(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        problems
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        self.formats.allowed_extensions = other
            .formats
            .allowed_extensions
            .or_else(|| self.formats.allowed_extensions.take());

        self.resolution.min_width = other.resolution.min_width.or(self.resolution.min_width);
        self.resolution.min_height = other.resolution.min_height.or(self.resolution.min_height);

        self.blur.threshold = other.blur.threshold.or(self.blur.threshold);

        self.brightness.lower = other.brightness.lower.or(self.brightness.lower);
        self.brightness.upper = other.brightness.upper.or(self.brightness.upper);

        self.saturation.threshold = other.saturation.threshold.or(self.saturation.threshold);
        self.noise.threshold = other.noise.threshold.or(self.noise.threshold);

        self.exposure.lower_percentile = other
            .exposure
            .lower_percentile
            .or(self.exposure.lower_percentile);
        self.exposure.upper_percentile = other
            .exposure
            .upper_percentile
            .or(self.exposure.upper_percentile);
        self.exposure.min_range = other.exposure.min_range.or(self.exposure.min_range);

        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.details = other.output.details.or(self.output.details);
        self.output.progress = other.output.progress.or(self.output.progress);
        self.output.min_score = other.output.min_score.or(self.output.min_score);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("qualgate").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.qualgate.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(".qualgate.toml"))
        .find(|path| path.exists())
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.blur.threshold.is_none());
        assert!(config.brightness.lower.is_none());
        assert!(config.formats.allowed_extensions.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: AppConfig = toml::from_str("").expect("parse empty config");
        assert!(config.general.recursive.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r"
[general]
recursive = true

[formats]
allowed_extensions = ['jpg', '.PNG', 'webp']

[resolution]
min_width = 1024
min_height = 768

[blur]
threshold = 80.0

[brightness]
lower = 40.0
upper = 200.0

[saturation]
threshold = 25.0

[noise]
threshold = 8.0

[exposure]
lower_percentile = 2.0
upper_percentile = 98.0
min_range = 60.0

[output]
format = 'json'
pretty = true
details = true
progress = false
min_score = 0.8
";
        let config: AppConfig = toml::from_str(toml).expect("parse full config");

        assert_eq!(config.general.recursive, Some(true));
        assert_eq!(
            config.formats.allowed_extensions,
            Some(vec!["jpg".into(), ".PNG".into(), "webp".into()])
        );
        assert_eq!(config.resolution.min_width, Some(1024));
        assert_eq!(config.blur.threshold, Some(80.0));
        assert_eq!(config.brightness.upper, Some(200.0));
        assert_eq!(config.noise.threshold, Some(8.0));
        assert_eq!(config.exposure.min_range, Some(60.0));
        assert_eq!(config.output.format, Some("json".to_string()));
        assert_eq!(config.output.min_score, Some(0.8));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_integer_threshold_is_accepted() {
        let config: AppConfig = toml::from_str("[blur]\nthreshold = 80\n").expect("integer");
        assert_eq!(config.blur.threshold, Some(80.0));
    }

    #[test]
    fn test_string_threshold_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[blur]\nthreshold = 'high'\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_configs() {
        let mut base: AppConfig = toml::from_str(
            r"
[blur]
threshold = 50.0

[brightness]
lower = 30.0
upper = 220.0
",
        )
        .expect("parse base");

        let override_config: AppConfig = toml::from_str(
            r"
[blur]
threshold = 70.0

[brightness]
upper = 210.0

[noise]
threshold = 12.0
",
        )
        .expect("parse override");

        base.merge(override_config);

        assert_eq!(base.blur.threshold, Some(70.0));
        assert_eq!(base.brightness.lower, Some(30.0));
        assert_eq!(base.brightness.upper, Some(210.0));
        assert_eq!(base.noise.threshold, Some(12.0));
    }

    #[test]
    fn test_merge_all_sections() {
        let mut base: AppConfig = toml::from_str(
            r"
[general]
recursive = false

[formats]
allowed_extensions = ['jpg']

[output]
format = 'json'
details = false
",
        )
        .expect("parse base");

        let override_config: AppConfig = toml::from_str(
            r"
[general]
recursive = true

[formats]
allowed_extensions = ['png', 'bmp']

[output]
format = 'jsonl'
details = true
",
        )
        .expect("parse override");

        base.merge(override_config);

        assert_eq!(base.general.recursive, Some(true));
        assert_eq!(
            base.formats.allowed_extensions,
            Some(vec!["png".into(), "bmp".into()])
        );
        assert_eq!(base.output.format, Some("jsonl".to_string()));
        assert_eq!(base.output.details, Some(true));
    }

    #[test]
    fn test_merge_empty_override_preserves_base() {
        let mut base: AppConfig = toml::from_str("[saturation]\nthreshold = 15.0\n").unwrap();
        base.merge(AppConfig::default());
        assert_eq!(base.saturation.threshold, Some(15.0));
    }

    #[test]
    fn test_invalid_toml_syntax_handled() {
        let result: Result<AppConfig, _> = toml::from_str("[blur\nthreshold = 0.5\n");
        assert!(result.is_err(), "invalid TOML should return error");
    }

    #[test]
    fn test_unknown_field_ignored() {
        let config: AppConfig = toml::from_str("[blur]\nthreshold = 50.0\nwindow = 3\n")
            .expect("unknown fields are ignored");
        assert_eq!(config.blur.threshold, Some(50.0));
    }

    #[test]
    fn test_find_config_in_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".qualgate.toml"), "").unwrap();

        assert_eq!(
            find_config_in_parents(&nested),
            Some(dir.path().join(".qualgate.toml"))
        );
    }

    #[test]
    fn test_load_file_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[noise\n").unwrap();
        assert!(load_file(&path).is_none());
    }

    // === Validation Tests ===

    #[test]
    fn test_validate_negative_threshold() {
        let mut config = AppConfig::default();
        config.noise.threshold = Some(-1.0);
        let problems = config.validate();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("noise.threshold"));
    }

    #[test]
    fn test_validate_brightness_bounds_inverted() {
        let mut config = AppConfig::default();
        config.brightness.lower = Some(200.0);
        config.brightness.upper = Some(100.0);
        assert!(config.validate()[0].contains("brightness.lower"));
    }

    #[test]
    fn test_validate_percentiles() {
        let mut config = AppConfig::default();
        config.exposure.lower_percentile = Some(-5.0);
        config.exposure.upper_percentile = Some(120.0);
        let problems = config.validate();
        assert_eq!(problems.len(), 2);

        let mut config = AppConfig::default();
        config.exposure.lower_percentile = Some(90.0);
        config.exposure.upper_percentile = Some(10.0);
        assert!(config.validate()[0].contains("must be below"));
    }

    #[test]
    fn test_validate_empty_allow_list() {
        let mut config = AppConfig::default();
        config.formats.allowed_extensions = Some(vec![String::new(), ".".into()]);
        assert!(config.validate()[0].contains("formats.allowed_extensions"));
    }

    #[test]
    fn test_validate_min_score_and_format() {
        let mut config = AppConfig::default();
        config.output.min_score = Some(1.5);
        config.output.format = Some("xml".to_string());
        let problems = config.validate();
        assert_eq!(problems.len(), 2);
        assert!(problems.iter().any(|p| p.contains("output.min_score")));
        assert!(problems.iter().any(|p| p.contains("output.format")));
    }

    #[test]
    fn test_validate_empty_config_passes() {
        assert!(AppConfig::default().validate().is_empty());
    }
}
