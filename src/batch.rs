//! Batch analysis: decode, measure, and size every logo in a directory.
//!
//! The driver behind the `analyze` command. Collects the logo files in a
//! flat source directory, runs each one through decode, content analysis,
//! and size normalization, and gathers per-file display dimensions:
//!
//! ```text
//! logos/
//! ├── acme.png      → decoded → metrics → 52x44 px, offset (0.0, -1.2)
//! ├── globex.webp   → decode failed     → skipped (recorded, not fatal)
//! ├── initech.jpg   → no content found  → skipped
//! └── notes.txt     → unsupported extension, never collected
//! ```
//!
//! A failing file never aborts the batch: it is dropped from the result map
//! and recorded with its reason so the report can surface it. The map is a
//! `BTreeMap` keyed by file name, which keeps the JSON artifact stable
//! across runs regardless of worker scheduling.
//!
//! ## Parallel Processing
//!
//! Files are analyzed in parallel using [rayon](https://docs.rs/rayon); the
//! pool size is set from `[processing] max_processes` at startup.

use crate::analysis::{self, ContentBox, DetectionMode, LogoDimensions, LogoMetrics};
use crate::config::BalanceConfig;
use crate::raster::{DecodeError, RasterDecoder, RustDecoder, supported_input_extensions};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Why a file was left out of the result map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The decoder could not produce a sample (unreadable or corrupt file).
    Decode(String),
    /// The file decoded fine but no pixel classified as content.
    NoContent,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Decode(message) => write!(f, "{message}"),
            SkipReason::NoContent => write!(f, "no content detected"),
        }
    }
}

/// A file the batch dropped, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub filename: String,
    pub reason: SkipReason,
}

/// Outcome of analyzing one directory of logos.
#[derive(Debug)]
pub struct BatchResult {
    /// Display dimensions per file name. This map is the JSON artifact.
    pub dimensions: BTreeMap<String, LogoDimensions>,
    /// Files left out, in directory order.
    pub skipped: Vec<SkippedFile>,
}

impl BatchResult {
    /// Total number of files the batch looked at.
    pub fn total(&self) -> usize {
        self.dimensions.len() + self.skipped.len()
    }
}

/// Everything the `inspect` command reports for a single file.
#[derive(Debug)]
pub struct FileReport {
    pub sample_width: u32,
    pub sample_height: u32,
    pub mode: DetectionMode,
    /// `None` when no pixel classified as content.
    pub content: Option<ContentReport>,
}

/// The measured content of one file, with its computed display size.
#[derive(Debug)]
pub struct ContentReport {
    pub bounds: ContentBox,
    pub metrics: LogoMetrics,
    pub display: LogoDimensions,
}

/// List the analyzable files in `root`, sorted by name.
///
/// Only plain files with a supported raster extension count; hidden files
/// and subdirectories are ignored. The source layout is flat by design, so
/// there is no recursion.
pub fn collect_logo_files(root: &Path) -> Result<Vec<PathBuf>, BatchError> {
    if !root.is_dir() {
        return Err(BatchError::NotADirectory(root.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            let name = p
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            !name.starts_with('.') && is_logo_file(p)
        })
        .collect();

    files.sort();
    Ok(files)
}

fn is_logo_file(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    supported_input_extensions().contains(&ext.as_str())
}

/// Analyze every logo in `root` with the stock decoder.
pub fn analyze_directory(root: &Path, config: &BalanceConfig) -> Result<BatchResult, BatchError> {
    let decoder = RustDecoder::new();
    analyze_with_decoder(&decoder, root, config)
}

/// Analyze every logo in `root` using a specific decoder (allows testing
/// with a mock).
pub fn analyze_with_decoder(
    decoder: &impl RasterDecoder,
    root: &Path,
    config: &BalanceConfig,
) -> Result<BatchResult, BatchError> {
    let files = collect_logo_files(root)?;

    enum Outcome {
        Sized(LogoDimensions),
        Skipped(SkipReason),
    }

    // Indexed collect preserves directory order for the skip list.
    let outcomes: Vec<(String, Outcome)> = files
        .par_iter()
        .map(|path| {
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let outcome = match analyze_file(decoder, path, config) {
                Ok(Some(display)) => Outcome::Sized(display),
                Ok(None) => Outcome::Skipped(SkipReason::NoContent),
                Err(e) => Outcome::Skipped(SkipReason::Decode(e.to_string())),
            };
            (filename, outcome)
        })
        .collect();

    let mut dimensions = BTreeMap::new();
    let mut skipped = Vec::new();
    for (filename, outcome) in outcomes {
        match outcome {
            Outcome::Sized(display) => {
                dimensions.insert(filename, display);
            }
            Outcome::Skipped(reason) => skipped.push(SkippedFile { filename, reason }),
        }
    }

    Ok(BatchResult {
        dimensions,
        skipped,
    })
}

fn analyze_file(
    decoder: &impl RasterDecoder,
    path: &Path,
    config: &BalanceConfig,
) -> Result<Option<LogoDimensions>, DecodeError> {
    let sample = decoder.decode_sample(path, config.analysis.sample_max_size)?;
    let metrics = analysis::extract_metrics(sample.view(), config.analysis.contrast_threshold);
    Ok(metrics.map(|m| analysis::normalize_size(&m, &config.sizing)))
}

/// Run the full analysis on one file and keep every intermediate result.
///
/// Backs the `inspect` command. Unlike the batch path, decode failures
/// propagate so the user sees the actual error.
pub fn inspect_file(
    decoder: &impl RasterDecoder,
    path: &Path,
    config: &BalanceConfig,
) -> Result<FileReport, DecodeError> {
    let sample = decoder.decode_sample(path, config.analysis.sample_max_size)?;
    let view = sample.view();
    let threshold = config.analysis.contrast_threshold;
    let mode = analysis::detection_mode(view);

    let content = analysis::find_content_box(view, threshold, mode).and_then(|bounds| {
        let metrics = analysis::extract_metrics(view, threshold)?;
        let display = analysis::normalize_size(&metrics, &config.sizing);
        Some(ContentReport {
            bounds,
            metrics,
            display,
        })
    });

    Ok(FileReport {
        sample_width: sample.width,
        sample_height: sample.height,
        mode,
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnalysisConfig, SizingConfig};
    use crate::raster::decoder::tests::MockDecoder;
    use crate::test_helpers::{blank_sample, logo_sample};
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "placeholder").unwrap();
    }

    // =========================================================================
    // File collection tests
    // =========================================================================

    #[test]
    fn collect_finds_supported_extensions_sorted() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "zeta.png");
        touch(tmp.path(), "acme.jpg");
        touch(tmp.path(), "mid.webp");

        let files = collect_logo_files(tmp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["acme.jpg", "mid.webp", "zeta.png"]);
    }

    #[test]
    fn collect_ignores_unsupported_and_hidden() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "logo.png");
        touch(tmp.path(), "notes.txt");
        touch(tmp.path(), "vector.svg");
        touch(tmp.path(), ".hidden.png");
        touch(tmp.path(), "config.toml");

        let files = collect_logo_files(tmp.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("logo.png"));
    }

    #[test]
    fn collect_ignores_subdirectories() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("nested.png")).unwrap();
        touch(tmp.path(), "flat.png");

        let files = collect_logo_files(tmp.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("flat.png"));
    }

    #[test]
    fn collect_extension_match_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "SHOUT.PNG");

        let files = collect_logo_files(tmp.path()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn collect_on_missing_directory_is_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("no-such-dir");

        let result = collect_logo_files(&missing);
        assert!(matches!(result, Err(BatchError::NotADirectory(_))));
    }

    #[test]
    fn collect_on_file_is_error() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "logo.png");

        let result = collect_logo_files(&tmp.path().join("logo.png"));
        assert!(matches!(result, Err(BatchError::NotADirectory(_))));
    }

    // =========================================================================
    // Batch analysis with mock decoder
    // =========================================================================

    #[test]
    fn analyze_maps_every_decodable_file() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.png");
        touch(tmp.path(), "b.png");

        let decoder = MockDecoder::new();
        decoder.insert_sample("a.png", logo_sample(40, 40));
        decoder.insert_sample("b.png", logo_sample(80, 20));

        let config = BalanceConfig::default();
        let result = analyze_with_decoder(&decoder, tmp.path(), &config).unwrap();

        assert_eq!(result.dimensions.len(), 2);
        assert!(result.skipped.is_empty());
        assert_eq!(result.total(), 2);
        assert!(result.dimensions.contains_key("a.png"));
        assert!(result.dimensions.contains_key("b.png"));
    }

    #[test]
    fn analyze_passes_configured_sample_bound_to_decoder() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.png");

        let decoder = MockDecoder::new();
        decoder.insert_sample("a.png", logo_sample(40, 40));

        let config = BalanceConfig {
            analysis: AnalysisConfig {
                sample_max_size: 64,
                ..Default::default()
            },
            ..Default::default()
        };
        analyze_with_decoder(&decoder, tmp.path(), &config).unwrap();

        let requests = decoder.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].file_name, "a.png");
        assert_eq!(requests[0].max_size, 64);
    }

    #[test]
    fn decode_failure_skips_file_without_aborting() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "good.png");
        touch(tmp.path(), "bad.png");

        let decoder = MockDecoder::new();
        decoder.insert_sample("good.png", logo_sample(40, 40));
        decoder.insert_failure("bad.png", "truncated stream");

        let config = BalanceConfig::default();
        let result = analyze_with_decoder(&decoder, tmp.path(), &config).unwrap();

        assert_eq!(result.dimensions.len(), 1);
        assert!(result.dimensions.contains_key("good.png"));
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].filename, "bad.png");
        assert!(matches!(result.skipped[0].reason, SkipReason::Decode(_)));
    }

    #[test]
    fn blank_file_skips_with_no_content_reason() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "empty.png");

        let decoder = MockDecoder::new();
        decoder.insert_sample("empty.png", blank_sample(30, 30));

        let config = BalanceConfig::default();
        let result = analyze_with_decoder(&decoder, tmp.path(), &config).unwrap();

        assert!(result.dimensions.is_empty());
        assert_eq!(
            result.skipped,
            vec![SkippedFile {
                filename: "empty.png".to_string(),
                reason: SkipReason::NoContent,
            }]
        );
    }

    #[test]
    fn skipped_files_keep_directory_order() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.png");
        touch(tmp.path(), "b.png");
        touch(tmp.path(), "c.png");

        let decoder = MockDecoder::new();
        decoder.insert_failure("a.png", "bad header");
        decoder.insert_sample("b.png", blank_sample(10, 10));
        decoder.insert_failure("c.png", "bad header");

        let config = BalanceConfig::default();
        let result = analyze_with_decoder(&decoder, tmp.path(), &config).unwrap();

        let names: Vec<&str> = result.skipped.iter().map(|s| s.filename.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn empty_directory_yields_empty_result() {
        let tmp = TempDir::new().unwrap();

        let decoder = MockDecoder::new();
        let config = BalanceConfig::default();
        let result = analyze_with_decoder(&decoder, tmp.path(), &config).unwrap();

        assert!(result.dimensions.is_empty());
        assert!(result.skipped.is_empty());
        assert_eq!(result.total(), 0);
    }

    #[test]
    fn wide_sample_yields_wide_display_box() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "wide.png");

        // Content block is 40x10, a 4:1 box.
        let decoder = MockDecoder::new();
        decoder.insert_sample("wide.png", logo_sample(80, 20));

        let config = BalanceConfig::default();
        let result = analyze_with_decoder(&decoder, tmp.path(), &config).unwrap();

        let dims = &result.dimensions["wide.png"];
        assert!(dims.width > dims.height);
        assert!(dims.width >= 1 && dims.height >= 1);
    }

    // =========================================================================
    // Single-file inspection
    // =========================================================================

    #[test]
    fn inspect_reports_sample_and_content() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "mark.png");

        let decoder = MockDecoder::new();
        decoder.insert_sample("mark.png", logo_sample(40, 40));

        let config = BalanceConfig::default();
        let report = inspect_file(&decoder, &tmp.path().join("mark.png"), &config).unwrap();

        assert_eq!((report.sample_width, report.sample_height), (40, 40));
        assert_eq!(report.mode, DetectionMode::Alpha);

        let content = report.content.expect("content should be detected");
        assert_eq!(content.bounds, ContentBox {
            x: 10,
            y: 10,
            width: 20,
            height: 20,
        });
        assert!((content.metrics.content_ratio - 1.0).abs() < 1e-9);
        assert_eq!(content.display.width, content.display.height);
    }

    #[test]
    fn inspect_blank_file_has_no_content() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "blank.png");

        let decoder = MockDecoder::new();
        decoder.insert_sample("blank.png", blank_sample(25, 15));

        let config = BalanceConfig::default();
        let report = inspect_file(&decoder, &tmp.path().join("blank.png"), &config).unwrap();

        assert_eq!((report.sample_width, report.sample_height), (25, 15));
        assert!(report.content.is_none());
    }

    #[test]
    fn inspect_decode_failure_propagates() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "broken.png");

        let decoder = MockDecoder::new();
        decoder.insert_failure("broken.png", "not a PNG");

        let config = BalanceConfig::default();
        let result = inspect_file(&decoder, &tmp.path().join("broken.png"), &config);
        assert!(matches!(result, Err(DecodeError::Decode(_))));
    }

    // =========================================================================
    // End-to-end with the real decoder
    // =========================================================================

    #[test]
    fn analyze_directory_with_real_png() {
        use image::codecs::png::PngEncoder;
        use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};

        let tmp = TempDir::new().unwrap();

        // 64x64 transparent canvas with an opaque 32x16 block.
        let img = RgbaImage::from_fn(64, 64, |x, y| {
            if (16..48).contains(&x) && (24..40).contains(&y) {
                Rgba([10, 10, 10, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        let file = fs::File::create(tmp.path().join("real.png")).unwrap();
        PngEncoder::new(file)
            .write_image(img.as_raw(), 64, 64, ExtendedColorType::Rgba8)
            .unwrap();

        // Pin the sample bound to the image size so no resampling blurs the
        // block edges, and turn off density compensation. That leaves a pure
        // aspect computation: 2:1 content, width 48 * sqrt(2), half as tall.
        let config = BalanceConfig {
            analysis: AnalysisConfig {
                sample_max_size: 64,
                ..Default::default()
            },
            sizing: SizingConfig {
                density_factor: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let result = analyze_directory(tmp.path(), &config).unwrap();

        assert!(result.skipped.is_empty());
        let dims = &result.dimensions["real.png"];
        assert_eq!(dims.width, 68);
        assert_eq!(dims.height, 34);
        assert_eq!(dims.offset_x, 0.0);
        assert_eq!(dims.offset_y, 0.0);
    }
}
