//! Pixel-level analysis of decoded logo rasters.
//!
//! Everything here is pure: input is an RGBA byte buffer plus dimensions,
//! output is plain numbers. Decoding and resampling live in [`crate::raster`].
//!
//! Analysis runs in passes over the working sample:
//!
//! 1. Detection mode: transparency scan plus background estimate
//! 2. Content bounding box
//! 3. Weighted visual center within the box
//! 4. Ink density against a white reference
//!
//! [`extract_metrics`] chains the passes; the individual steps are exposed
//! for diagnostics (the `inspect` command prints them separately).

use std::fmt;

/// Alpha at or above which a pixel counts as fully opaque. A single pixel
/// below this switches the whole image to alpha-mode analysis.
const OPAQUE_ALPHA_MIN: u8 = 250;

/// Background reference for the density pass. Density asks how much of the
/// box reads as ink on a plain white backdrop, independent of the estimated
/// background the other passes use.
const DENSITY_BACKGROUND: [u8; 3] = [255, 255, 255];

/// Density reported for a degenerate zero-pixel box.
const NEUTRAL_DENSITY: f64 = 0.5;

/// Borrowed view over a decoded RGBA sample.
///
/// Rows are tightly packed, 4 bytes per pixel, no padding.
#[derive(Debug, Clone, Copy)]
pub struct PixelView<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> PixelView<'a> {
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize * 4,
            "RGBA buffer length must be width * height * 4"
        );
        Self {
            data,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

/// How content is told apart from backdrop for one image.
///
/// Decided once per image and threaded through every pass so they all agree
/// on what counts as content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMode {
    /// The image carries real transparency; alpha alone separates content.
    Alpha,
    /// Fully opaque image; content is whatever contrasts with the estimated
    /// background color.
    Color { background: [u8; 3] },
}

impl fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionMode::Alpha => write!(f, "alpha channel"),
            DetectionMode::Color {
                background: [r, g, b],
            } => {
                write!(f, "color contrast vs #{r:02x}{g:02x}{b:02x}")
            }
        }
    }
}

/// Axis-aligned bounding box of detected content, in sample coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentBox {
    pub x: u32,
    pub y: u32,
    /// Inclusive span: a single content pixel yields width 1.
    pub width: u32,
    pub height: u32,
}

/// Perceptual measurements for one logo raster.
///
/// Produced by [`extract_metrics`], consumed by the size normalizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoMetrics {
    /// Width over height of the content bounding box.
    pub content_ratio: f64,
    /// How much of the box reads as ink: coverage times mean opacity, 0-1.
    pub pixel_density: f64,
    /// Horizontal displacement of the visual mass from the box center, as a
    /// fraction of box width (roughly -0.5 to 0.5).
    pub visual_center_x: f64,
    /// Vertical counterpart of `visual_center_x`, as a fraction of box height.
    pub visual_center_y: f64,
}

/// Decide how content will be detected for this image.
///
/// Any pixel with alpha below the opaque cutoff puts the image in
/// [`DetectionMode::Alpha`]. Otherwise the background is estimated as the
/// per-channel average of the four corner pixels (rounded to the nearest
/// integer) and detection runs on color contrast.
///
/// The view must be at least 1x1.
pub fn detection_mode(view: PixelView<'_>) -> DetectionMode {
    let translucent = view
        .data
        .chunks_exact(4)
        .any(|px| px[3] < OPAQUE_ALPHA_MIN);
    if translucent {
        return DetectionMode::Alpha;
    }
    DetectionMode::Color {
        background: estimate_background(view),
    }
}

fn estimate_background(view: PixelView<'_>) -> [u8; 3] {
    let right = view.width - 1;
    let bottom = view.height - 1;
    let corners = [
        view.rgba(0, 0),
        view.rgba(right, 0),
        view.rgba(0, bottom),
        view.rgba(right, bottom),
    ];
    let mut background = [0u8; 3];
    for (channel, value) in background.iter_mut().enumerate() {
        let sum: u32 = corners.iter().map(|px| px[channel] as u32).sum();
        *value = (sum as f64 / 4.0).round() as u8;
    }
    background
}

/// The single classification predicate shared by every pass.
///
/// A pixel is content when its alpha strictly exceeds `threshold` and, in
/// color mode, at least one channel differs from the background by strictly
/// more than `threshold`. Alpha mode skips the color check entirely.
fn is_content(px: [u8; 4], threshold: u8, mode: DetectionMode) -> bool {
    let [r, g, b, a] = px;
    if a <= threshold {
        return false;
    }
    match mode {
        DetectionMode::Alpha => true,
        DetectionMode::Color { background } => {
            r.abs_diff(background[0]) > threshold
                || g.abs_diff(background[1]) > threshold
                || b.abs_diff(background[2]) > threshold
        }
    }
}

/// Scan for the bounding box of all content pixels.
///
/// Returns `None` when no pixel classifies as content.
pub fn find_content_box(
    view: PixelView<'_>,
    threshold: u8,
    mode: DetectionMode,
) -> Option<ContentBox> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut found = false;

    for y in 0..view.height {
        for x in 0..view.width {
            if !is_content(view.rgba(x, y), threshold, mode) {
                continue;
            }
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    if !found {
        return None;
    }
    Some(ContentBox {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

/// Weighted centroid of content within the box, as signed fractions of the
/// box dimensions.
///
/// Alpha mode weights each content pixel by opacity alone. Color mode
/// multiplies opacity by the square root of the Euclidean color distance to
/// the background; the double square root (distance is itself a root of the
/// squared channel deltas) dampens contrast differences so a black mark and
/// a mid-gray mark pull with comparable strength.
fn visual_center(
    view: PixelView<'_>,
    bounds: ContentBox,
    threshold: u8,
    mode: DetectionMode,
) -> (f64, f64) {
    let mut weight_sum = 0.0;
    let mut x_sum = 0.0;
    let mut y_sum = 0.0;

    for y in bounds.y..bounds.y + bounds.height {
        for x in bounds.x..bounds.x + bounds.width {
            let px = view.rgba(x, y);
            if !is_content(px, threshold, mode) {
                continue;
            }
            let weight = pixel_weight(px, mode);
            weight_sum += weight;
            // Pixel centers, relative to the box origin.
            x_sum += weight * ((x - bounds.x) as f64 + 0.5);
            y_sum += weight * ((y - bounds.y) as f64 + 0.5);
        }
    }

    if weight_sum <= 0.0 {
        return (0.0, 0.0);
    }
    let box_w = bounds.width as f64;
    let box_h = bounds.height as f64;
    let dx = x_sum / weight_sum - box_w / 2.0;
    let dy = y_sum / weight_sum - box_h / 2.0;
    (dx / box_w, dy / box_h)
}

fn pixel_weight(px: [u8; 4], mode: DetectionMode) -> f64 {
    let opacity = px[3] as f64 / 255.0;
    match mode {
        DetectionMode::Alpha => opacity,
        DetectionMode::Color { background } => {
            let dr = px[0] as f64 - background[0] as f64;
            let dg = px[1] as f64 - background[1] as f64;
            let db = px[2] as f64 - background[2] as f64;
            let distance = (dr * dr + dg * dg + db * db).sqrt();
            distance.sqrt() * opacity
        }
    }
}

/// Ink density inside the box: coverage times mean opacity of filled pixels.
///
/// Fill is judged against plain white rather than the estimated background;
/// alpha mode is unaffected since its predicate never looks at color. A
/// zero-pixel box reports the neutral 0.5, a box with no filled pixels 0.
fn pixel_density(
    view: PixelView<'_>,
    bounds: ContentBox,
    threshold: u8,
    mode: DetectionMode,
) -> f64 {
    let total = bounds.width as u64 * bounds.height as u64;
    if total == 0 {
        return NEUTRAL_DENSITY;
    }

    let fill_mode = match mode {
        DetectionMode::Alpha => DetectionMode::Alpha,
        DetectionMode::Color { .. } => DetectionMode::Color {
            background: DENSITY_BACKGROUND,
        },
    };

    let mut filled = 0u64;
    let mut opacity_sum = 0.0;
    for y in bounds.y..bounds.y + bounds.height {
        for x in bounds.x..bounds.x + bounds.width {
            let px = view.rgba(x, y);
            if !is_content(px, threshold, fill_mode) {
                continue;
            }
            filled += 1;
            opacity_sum += px[3] as f64 / 255.0;
        }
    }

    if filled == 0 {
        return 0.0;
    }
    let coverage = filled as f64 / total as f64;
    coverage * (opacity_sum / filled as f64)
}

/// Run the full analysis over one decoded sample.
///
/// # Arguments
/// * `view` - RGBA working sample (already resampled to analysis size)
/// * `threshold` - Content cutoff applied to alpha and color distance (0-255)
///
/// # Returns
/// * `Some(LogoMetrics)` when content was detected
/// * `None` for empty buffers and images with no detectable content
pub fn extract_metrics(view: PixelView<'_>, threshold: u8) -> Option<LogoMetrics> {
    if view.width == 0 || view.height == 0 {
        return None;
    }

    let mode = detection_mode(view);
    let bounds = find_content_box(view, threshold, mode)?;
    let (center_x, center_y) = visual_center(view, bounds, threshold, mode);
    let density = pixel_density(view, bounds, threshold, mode);

    Some(LogoMetrics {
        content_ratio: bounds.width as f64 / bounds.height as f64,
        pixel_density: density,
        visual_center_x: center_x,
        visual_center_y: center_y,
    })
}
