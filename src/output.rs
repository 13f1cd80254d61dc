//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output leads with what was measured, not with filesystem mechanics. Each
//! logo gets one line carrying its positional index, file name, and computed
//! display geometry; skipped files are grouped at the end with their reason
//! so a long batch stays scannable.
//!
//! # Output Format
//!
//! ## Analyze
//!
//! ```text
//! Logos
//! 001 acme.png → 52x26 px, offset (0.0, -1.2)
//! 002 globex.webp → 96x24 px, offset (2.1, 0.0)
//!
//! Skipped
//!     initech.jpg: no content detected
//!
//! Sized 2 of 3 logos
//! ```
//!
//! ## Check
//!
//! ```text
//! Logos
//! 001 acme.png
//! 002 globex.webp
//!
//! 2 files eligible for analysis
//! ```
//!
//! ## Inspect
//!
//! ```text
//! acme.png
//!     Sample: 200x150 px
//!     Detection: alpha channel
//!     Content box: 176x98 at (12, 8)
//!     Aspect ratio: 1.80
//!     Pixel density: 0.42
//!     Visual center: (0.031, -0.025)
//!     Display: 64x36 px, offset (2.0, -0.9)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::analysis::LogoDimensions;
use crate::batch::{BatchResult, FileReport};
use crate::raster::supported_input_extensions;
use std::path::PathBuf;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// One logo's display geometry: integer box plus 1-decimal offsets.
fn format_dimensions(dims: &LogoDimensions) -> String {
    format!(
        "{}x{} px, offset ({:.1}, {:.1})",
        dims.width, dims.height, dims.offset_x, dims.offset_y
    )
}

// ============================================================================
// Analyze output
// ============================================================================

/// Format batch results: one line per sized logo, skipped files grouped
/// below with their reason, then a summary count.
pub fn format_analyze_output(result: &BatchResult) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Logos".to_string());
    for (i, (filename, dims)) in result.dimensions.iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}",
            format_index(i + 1),
            filename,
            format_dimensions(dims)
        ));
    }

    if !result.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for skip in &result.skipped {
            lines.push(format!("    {}: {}", skip.filename, skip.reason));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Sized {} of {} logos",
        result.dimensions.len(),
        result.total()
    ));

    lines
}

/// Print analyze output to stdout.
pub fn print_analyze_output(result: &BatchResult) {
    for line in format_analyze_output(result) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the list of files the analyze command would pick up.
pub fn format_check_output(files: &[PathBuf]) -> Vec<String> {
    if files.is_empty() {
        return vec![
            "No analyzable files found".to_string(),
            format!("    Supported: {}", supported_input_extensions().join(", ")),
        ];
    }

    let mut lines = Vec::new();
    lines.push("Logos".to_string());
    for (i, path) in files.iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        lines.push(format!("{} {}", format_index(i + 1), name));
    }
    lines.push(String::new());
    lines.push(format!("{} files eligible for analysis", files.len()));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(files: &[PathBuf]) {
    for line in format_check_output(files) {
        println!("{}", line);
    }
}

// ============================================================================
// Inspect output
// ============================================================================

/// Format the full measurement breakdown for a single file.
pub fn format_inspect_output(filename: &str, report: &FileReport) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(filename.to_string());
    lines.push(format!(
        "    Sample: {}x{} px",
        report.sample_width, report.sample_height
    ));
    lines.push(format!("    Detection: {}", report.mode));

    match &report.content {
        Some(content) => {
            lines.push(format!(
                "    Content box: {}x{} at ({}, {})",
                content.bounds.width, content.bounds.height, content.bounds.x, content.bounds.y
            ));
            lines.push(format!(
                "    Aspect ratio: {:.2}",
                content.metrics.content_ratio
            ));
            lines.push(format!(
                "    Pixel density: {:.2}",
                content.metrics.pixel_density
            ));
            lines.push(format!(
                "    Visual center: ({:.3}, {:.3})",
                content.metrics.visual_center_x, content.metrics.visual_center_y
            ));
            lines.push(format!(
                "    Display: {}",
                format_dimensions(&content.display)
            ));
        }
        None => lines.push("    No content detected".to_string()),
    }

    lines
}

/// Print inspect output to stdout.
pub fn print_inspect_output(filename: &str, report: &FileReport) {
    for line in format_inspect_output(filename, report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
