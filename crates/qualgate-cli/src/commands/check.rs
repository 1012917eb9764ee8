//! Check command - assess images and gate on their quality score.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use qualgate_adapters::FsImageSource;
use qualgate_core::{
    BlurConfig, BrightnessConfig, ExposureConfig, FormatAllowList, ImageSource, NoiseConfig,
    ProgressEvent, ProgressSink, QualityConfig, QualityEngine, ReportOutput, ResolutionConfig,
    SaturationConfig,
};
use tracing::{debug, info, warn};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, OutputFormat, ProgressBar};

/// Hardcoded default for the minimum passing score.
const DEFAULT_MIN_SCORE: f64 = 0.6;

/// Parse and validate a score value (0.0-1.0).
fn parse_score(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=1.0"))
    }
}

/// Parse and validate a percentile (0-100).
fn parse_percentile(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0..=100"))
    }
}

/// Shared arguments for image assessment.
#[derive(Args, Clone, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckArgs {
    /// Files or directories to assess
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Comma-separated list of accepted file extensions
    #[arg(long, value_name = "EXTS", env = "QUALGATE_ALLOWED_EXTENSIONS")]
    pub allowed_extensions: Option<String>,

    /// Minimum image width in pixels
    #[arg(long, value_name = "PX")]
    pub min_width: Option<u32>,

    /// Minimum image height in pixels
    #[arg(long, value_name = "PX")]
    pub min_height: Option<u32>,

    /// Minimum Laplacian variance for a sharp image
    #[arg(long)]
    pub blur_threshold: Option<f64>,

    /// Mean luminance must lie above this
    #[arg(long)]
    pub brightness_lower: Option<f64>,

    /// Mean luminance must lie below this
    #[arg(long)]
    pub brightness_upper: Option<f64>,

    /// Minimum mean saturation (0-255)
    #[arg(long)]
    pub saturation_threshold: Option<f64>,

    /// Maximum residual noise standard deviation
    #[arg(long)]
    pub noise_threshold: Option<f64>,

    /// Lower luminance percentile for the tonal range (0-100)
    #[arg(long, value_parser = parse_percentile)]
    pub exposure_lower: Option<f64>,

    /// Upper luminance percentile for the tonal range (0-100)
    #[arg(long, value_parser = parse_percentile)]
    pub exposure_upper: Option<f64>,

    /// Minimum spread between the exposure percentiles
    #[arg(long)]
    pub exposure_min_range: Option<f64>,

    /// Minimum quality score for a zero exit status (0.0-1.0)
    #[arg(long, value_parser = parse_score)]
    pub min_score: Option<f64>,

    /// Include per-check measurements in the output
    #[arg(long)]
    pub details: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Allow-list from the config files (populated by `with_config`).
    #[arg(skip)]
    config_extensions: Option<Vec<String>>,
}

impl CheckArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. Environment and CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        args.min_width = args.min_width.or(config.resolution.min_width);
        args.min_height = args.min_height.or(config.resolution.min_height);
        args.blur_threshold = args.blur_threshold.or(config.blur.threshold);
        args.brightness_lower = args.brightness_lower.or(config.brightness.lower);
        args.brightness_upper = args.brightness_upper.or(config.brightness.upper);
        args.saturation_threshold = args.saturation_threshold.or(config.saturation.threshold);
        args.noise_threshold = args.noise_threshold.or(config.noise.threshold);
        args.exposure_lower = args.exposure_lower.or(config.exposure.lower_percentile);
        args.exposure_upper = args.exposure_upper.or(config.exposure.upper_percentile);
        args.exposure_min_range = args.exposure_min_range.or(config.exposure.min_range);
        args.min_score = args.min_score.or(config.output.min_score);

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.details {
            args.details = config.output.details.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args.config_extensions
            .clone_from(&config.formats.allowed_extensions);

        args
    }

    /// Accepted extensions: CLI/env, then config, then the built-in list.
    pub fn formats(&self) -> FormatAllowList {
        if let Some(ref list) = self.allowed_extensions {
            FormatAllowList::parse(list)
        } else if let Some(ref list) = self.config_extensions {
            FormatAllowList::new(list)
        } else {
            FormatAllowList::default()
        }
    }

    /// Thresholds for every check, defaults filled in.
    pub fn quality_config(&self) -> QualityConfig {
        let defaults = QualityConfig::default();
        QualityConfig {
            resolution: ResolutionConfig {
                min_width: self.min_width.unwrap_or(defaults.resolution.min_width),
                min_height: self.min_height.unwrap_or(defaults.resolution.min_height),
            },
            blur: BlurConfig {
                threshold: self.blur_threshold.unwrap_or(defaults.blur.threshold),
            },
            brightness: BrightnessConfig {
                lower: self.brightness_lower.unwrap_or(defaults.brightness.lower),
                upper: self.brightness_upper.unwrap_or(defaults.brightness.upper),
            },
            saturation: SaturationConfig {
                threshold: self
                    .saturation_threshold
                    .unwrap_or(defaults.saturation.threshold),
            },
            noise: NoiseConfig {
                threshold: self.noise_threshold.unwrap_or(defaults.noise.threshold),
            },
            exposure: ExposureConfig {
                lower_percentile: self
                    .exposure_lower
                    .unwrap_or(defaults.exposure.lower_percentile),
                upper_percentile: self
                    .exposure_upper
                    .unwrap_or(defaults.exposure.upper_percentile),
                min_range: self
                    .exposure_min_range
                    .unwrap_or(defaults.exposure.min_range),
            },
        }
    }

    /// Get minimum score with fallback to hardcoded default.
    fn min_score(&self) -> f64 {
        self.min_score.unwrap_or(DEFAULT_MIN_SCORE)
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

/// Result of running the check command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckResult {
    /// Number of images assessed.
    pub processed: usize,
    /// Number of images that could not be loaded.
    pub skipped: usize,
    /// Number of reports below the minimum score or resolution.
    pub below_threshold: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Per-run settings that shape the batch but not the checks.
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    /// Keep per-check measurements in the written reports.
    pub details: bool,
    /// Score a report must reach to count as passing.
    pub min_score: f64,
}

/// Run the check command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &CheckArgs) -> Result<CheckResult> {
    info!("Running check command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let formats = args.formats();
    if formats.is_empty() {
        warn!("Allowed extension list is empty; every file will be rejected");
    }
    debug!("Allowed extensions: {}", formats.extensions().join(","));

    let source = FsImageSource::new(args.paths.clone(), args.recursive, formats);
    let total = source.count_hint();

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    let output = JsonOutput::stdout(args.format(), args.pretty);

    let config = args.quality_config();
    debug!("Quality config: {config:?}");

    process_images(
        &source,
        &config,
        &output,
        &progress_bar,
        BatchOptions {
            details: args.details,
            min_score: args.min_score(),
        },
    )
}

/// Assess every image from `source`, one engine per image.
///
/// Load failures are reported as skipped and do not stop the batch.
pub fn process_images(
    source: &dyn ImageSource,
    config: &QualityConfig,
    output: &dyn ReportOutput,
    progress: &dyn ProgressSink,
    options: BatchOptions,
) -> Result<CheckResult> {
    let total = source.count_hint();
    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut below_threshold = 0usize;

    for (index, image_result) in source.images().enumerate() {
        let image = match image_result {
            Ok(img) => img,
            Err(e) => {
                warn!("Skipping {}: {e}", e.path().display());
                progress.on_event(ProgressEvent::Skipped {
                    path: e.path().display().to_string(),
                    reason: e.to_string(),
                });
                skipped += 1;
                continue;
            }
        };

        progress.on_event(ProgressEvent::Started {
            path: image.path.clone(),
            index,
            total,
        });

        let report = QualityEngine::from_image(image).classify_quality_with(config);

        if !report.meets(options.min_score) {
            below_threshold += 1;
        }

        if options.details {
            output.write(&report)?;
        } else {
            output.write(&report.clone().without_details())?;
        }

        progress.on_event(ProgressEvent::Completed { report });
        processed += 1;
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished { processed, skipped });

    let exit_code = if below_threshold > 0 {
        ExitCode::BelowThreshold
    } else {
        ExitCode::Success
    };

    Ok(CheckResult {
        processed,
        skipped,
        below_threshold,
        exit_code,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use qualgate_core::CheckKind;
    use qualgate_test_support::{
        MockImageSource, MockProgressSink, MockReportOutput, SyntheticImageBuilder,
    };

    fn options(details: bool) -> BatchOptions {
        BatchOptions {
            details,
            min_score: DEFAULT_MIN_SCORE,
        }
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("0.8"), Ok(0.8));
        assert!(parse_score("1.2").is_err());
        assert!(parse_score("abc").is_err());
    }

    #[test]
    fn test_parse_percentile() {
        assert_eq!(parse_percentile("95"), Ok(95.0));
        assert!(parse_percentile("101").is_err());
    }

    #[test]
    fn test_quality_config_defaults() {
        assert_eq!(CheckArgs::default().quality_config(), QualityConfig::default());
    }

    #[test]
    fn test_with_config_cli_wins() {
        let config: AppConfig = toml::from_str(
            r"
[general]
recursive = true

[formats]
allowed_extensions = ['png']

[blur]
threshold = 80.0

[noise]
threshold = 12.0

[output]
format = 'json'
details = true
min_score = 0.8
",
        )
        .unwrap();

        let args = CheckArgs {
            blur_threshold: Some(60.0),
            ..Default::default()
        };
        let merged = CheckArgs::with_config(args, &config);

        assert!(merged.recursive);
        assert!(merged.details);
        assert_eq!(merged.format(), OutputFormat::Json);
        assert_eq!(merged.min_score(), 0.8);

        let quality = merged.quality_config();
        assert_eq!(quality.blur.threshold, 60.0);
        assert_eq!(quality.noise.threshold, 12.0);
        assert_eq!(merged.formats().extensions(), ["png".to_string()]);
    }

    #[test]
    fn test_cli_allow_list_beats_config() {
        let config: AppConfig =
            toml::from_str("[formats]\nallowed_extensions = ['png']\n").unwrap();
        let args = CheckArgs {
            allowed_extensions: Some(".BMP, jpg".into()),
            ..Default::default()
        };
        let merged = CheckArgs::with_config(args, &config);
        assert_eq!(
            merged.formats().extensions(),
            ["bmp".to_string(), "jpg".to_string()]
        );
    }

    #[test]
    fn test_process_images_scores_and_exit_code() {
        let source = MockImageSource::new(vec![
            SyntheticImageBuilder::good_photo(640, 640),
            SyntheticImageBuilder::blurry_thumbnail(320, 240),
        ]);
        let output = MockReportOutput::new();
        let progress = MockProgressSink::new();

        let result = process_images(
            &source,
            &QualityConfig::default(),
            &output,
            &progress,
            options(false),
        )
        .unwrap();

        assert_eq!(result.processed, 2);
        assert_eq!(result.skipped, 0);
        assert_eq!(result.below_threshold, 1);
        assert_eq!(result.exit_code, ExitCode::BelowThreshold);

        let reports = output.reports();
        assert_eq!(reports.len(), 2);
        assert!((reports[0].quality_score - 1.0).abs() < 1e-9);
        assert!(reports[0].resolution_passed);
        assert!(!reports[1].resolution_passed);
        assert!(reports.iter().all(|r| r.checks.is_empty()));
        assert_eq!(output.flush_count(), 1);
    }

    #[test]
    fn test_process_images_keeps_details_when_asked() {
        let source = MockImageSource::new(vec![SyntheticImageBuilder::uniform_gray(8, 8, 128)]);
        let output = MockReportOutput::new();
        let progress = MockProgressSink::new();

        process_images(
            &source,
            &QualityConfig::default(),
            &output,
            &progress,
            options(true),
        )
        .unwrap();

        let report = &output.reports()[0];
        assert_eq!(report.checks.len(), 6);
        assert!(report.outcome(CheckKind::Resolution).is_some());

        let completed = progress.events().into_iter().find_map(|e| match e {
            ProgressEvent::Completed { report } => Some(report),
            _ => None,
        });
        assert_eq!(completed.as_ref(), Some(report));
    }

    #[test]
    fn test_process_images_skips_missing() {
        let source = MockImageSource::new(vec![SyntheticImageBuilder::good_photo(640, 640)])
            .with_missing("/nonexistent/a.jpg");
        let output = MockReportOutput::new();
        let progress = MockProgressSink::new();

        let result = process_images(
            &source,
            &QualityConfig::default(),
            &output,
            &progress,
            options(false),
        )
        .unwrap();

        assert_eq!(result.processed, 1);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.exit_code, ExitCode::Success);
        assert_eq!(progress.started_count(), 1);
        assert_eq!(progress.completed_count(), 1);
        assert_eq!(progress.skipped_count(), 1);
        assert_eq!(progress.finished_counts(), Some((1, 1)));
    }

    #[test]
    fn test_process_images_empty_source() {
        let result = process_images(
            &MockImageSource::empty(),
            &QualityConfig::default(),
            &MockReportOutput::new(),
            &MockProgressSink::new(),
            options(false),
        )
        .unwrap();
        assert_eq!(result.processed, 0);
        assert_eq!(result.exit_code, ExitCode::Success);
    }
}
