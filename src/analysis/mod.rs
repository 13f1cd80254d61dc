//! Perceptual logo analysis: pure functions over decoded pixels.
//!
//! | Stage | Input → Output |
//! |---|---|
//! | **Metrics** | RGBA sample → ratio, density, visual center |
//! | **Normalize** | metrics + tuning → width, height, offsets |
//!
//! The module is split into:
//! - **Metrics**: detection mode, content box, weighted center, density
//! - **Normalize**: power-law sizing and density compensation
//!
//! Neither half touches the filesystem; decoding lives in [`crate::raster`].

pub mod metrics;
pub mod normalize;

pub use metrics::{
    ContentBox, DetectionMode, LogoMetrics, PixelView, detection_mode, extract_metrics,
    find_content_box,
};
pub use normalize::{LogoDimensions, normalize_size};
