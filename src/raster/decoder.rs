//! Raster decoding seam and shared types.
//!
//! The [`RasterDecoder`] trait covers the single operation the analysis
//! pipeline needs from an image library: produce a bounded RGBA working
//! sample from a file on disk.
//!
//! The production implementation is
//! [`RustDecoder`](super::rust_decoder::RustDecoder): pure Rust decoders,
//! statically linked into the binary.

use std::path::Path;
use thiserror::Error;

use crate::analysis::PixelView;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
}

/// A decoded RGBA working sample, bounded by the configured sample size.
#[derive(Debug, Clone)]
pub struct RgbaSample {
    /// Tightly packed RGBA bytes, 4 per pixel.
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl RgbaSample {
    /// Borrow the sample for analysis.
    pub fn view(&self) -> PixelView<'_> {
        PixelView::new(&self.pixels, self.width, self.height)
    }
}

/// Trait for raster decoders.
///
/// Implementations decode a logo file, force an alpha channel, and resample
/// the result to fit within `max_size` on the longest edge (small inputs are
/// scaled up to the bound as well).
pub trait RasterDecoder: Sync {
    fn decode_sample(&self, path: &Path, max_size: u32) -> Result<RgbaSample, DecodeError>;
}
