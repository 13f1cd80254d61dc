//! Pure sizing arithmetic: metrics in, display geometry out.
//!
//! No I/O and no pixels; everything here is testable with plain numbers.

use serde::{Deserialize, Serialize};

use crate::analysis::metrics::LogoMetrics;
use crate::config::SizingConfig;

/// Lower clamp for the density compensation multiplier.
const DENSITY_SCALE_MIN: f64 = 0.5;
/// Upper clamp for the density compensation multiplier.
const DENSITY_SCALE_MAX: f64 = 2.0;

/// Final display geometry for one logo.
///
/// This is the per-file value of the persisted artifact: integer pixel
/// dimensions plus sub-pixel offsets that re-center the visual mass.
/// Serializes with camelCase keys (`width`, `height`, `offsetX`, `offsetY`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoDimensions {
    pub width: u32,
    pub height: u32,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Map perceptual metrics to display dimensions and offsets.
///
/// Width follows a power law on the content aspect ratio,
/// `ratio^scale_factor * base_size`, with height recovered from the ratio.
/// When density compensation is active (both `density_factor` and the
/// measured density are positive), dimensions are multiplied by
/// `(reference / density)^(density_factor * density_dampening)`, clamped to
/// [0.5, 2.0]. Offsets counteract the visual-center displacement and are
/// computed from the compensated floating dimensions, rounded to one
/// decimal; width and height round to whole pixels with a floor of 1.
///
/// # Arguments
/// * `metrics` - Extracted measurements for one logo
/// * `sizing` - Tuning parameters (base size, exponents, density reference)
///
/// # Examples
/// ```
/// use logofit::analysis::{normalize_size, LogoMetrics};
/// use logofit::config::SizingConfig;
///
/// // A square logo at exactly the reference density maps to the base size.
/// let metrics = LogoMetrics {
///     content_ratio: 1.0,
///     pixel_density: 0.35,
///     visual_center_x: 0.0,
///     visual_center_y: 0.0,
/// };
/// let dims = normalize_size(&metrics, &SizingConfig::default());
/// assert_eq!((dims.width, dims.height), (48, 48));
/// assert_eq!((dims.offset_x, dims.offset_y), (0.0, 0.0));
/// ```
pub fn normalize_size(metrics: &LogoMetrics, sizing: &SizingConfig) -> LogoDimensions {
    let ratio = metrics.content_ratio;
    let mut width = ratio.powf(sizing.scale_factor) * sizing.base_size as f64;
    let mut height = width / ratio;

    if sizing.density_factor > 0.0 && metrics.pixel_density > 0.0 {
        let density_ratio = metrics.pixel_density / sizing.reference_density;
        let exponent = sizing.density_factor * sizing.density_dampening;
        let scale = (1.0 / density_ratio)
            .powf(exponent)
            .clamp(DENSITY_SCALE_MIN, DENSITY_SCALE_MAX);
        width *= scale;
        height *= scale;
    }

    LogoDimensions {
        width: (width.round() as u32).max(1),
        height: (height.round() as u32).max(1),
        offset_x: round_offset(-metrics.visual_center_x * width),
        offset_y: round_offset(-metrics.visual_center_y * height),
    }
}

/// Round to one decimal place, collapsing -0.0 so centered logos serialize
/// as plain 0.0.
fn round_offset(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}
