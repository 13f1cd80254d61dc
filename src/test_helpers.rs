//! Shared test utilities for the logofit test suite.
//!
//! Provides synthetic RGBA canvas builders used by the analysis and batch
//! tests. All buffers are row-major RGBA with 4 bytes per pixel, matching
//! what [`crate::raster::RgbaSample`] carries.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! // 10x10 transparent canvas with an opaque red 4x2 block at (2, 3).
//! let mut pixels = canvas(10, 10, [0, 0, 0, 0]);
//! paint_rect(&mut pixels, 10, 2, 3, 4, 2, [255, 0, 0, 255]);
//!
//! let view = PixelView::new(&pixels, 10, 10);
//! ```

use crate::raster::RgbaSample;

// =========================================================================
// Canvas builders
// =========================================================================

/// Build a `width` x `height` RGBA buffer filled with a single pixel value.
pub fn canvas(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..width * height {
        pixels.extend_from_slice(&rgba);
    }
    pixels
}

/// Overwrite a `w` x `h` rectangle at `(x, y)` with a single pixel value.
///
/// Coordinates must lie within the canvas; out-of-range writes panic on the
/// slice index, which is the failure mode a test wants anyway.
pub fn paint_rect(pixels: &mut [u8], canvas_width: u32, x: u32, y: u32, w: u32, h: u32, rgba: [u8; 4]) {
    for row in y..y + h {
        for col in x..x + w {
            let idx = ((row * canvas_width + col) * 4) as usize;
            pixels[idx..idx + 4].copy_from_slice(&rgba);
        }
    }
}

// =========================================================================
// Decoded-sample fixtures
// =========================================================================

/// A decoded sample with real content: transparent canvas, opaque dark
/// block covering the central half in each direction.
pub fn logo_sample(width: u32, height: u32) -> RgbaSample {
    let mut pixels = canvas(width, height, [0, 0, 0, 0]);
    paint_rect(
        &mut pixels,
        width,
        width / 4,
        height / 4,
        width / 2,
        height / 2,
        [20, 20, 20, 255],
    );
    RgbaSample {
        pixels,
        width,
        height,
    }
}

/// A decoded sample with nothing in it: fully transparent.
pub fn blank_sample(width: u32, height: u32) -> RgbaSample {
    RgbaSample {
        pixels: canvas(width, height, [0, 0, 0, 0]),
        width,
        height,
    }
}
