//! Pure Rust raster decoding via the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG, GIF, WebP) | `image` crate (pure Rust decoders) |
//! | Resample to working size | `DynamicImage::resize` with `Lanczos3` |
//! | Force alpha channel | `DynamicImage::to_rgba8` |

use image::imageops::FilterType;
use image::{ImageFormat, ImageReader};
use std::path::Path;
use std::sync::LazyLock;

use super::decoder::{DecodeError, RasterDecoder, RgbaSample};

/// Extensions whose decoders are compiled in and known to work.
///
/// Kept in sync with the `image` feature set in Cargo.toml; the
/// `reading_enabled` filter drops any entry whose decoder is missing from
/// the build.
const LOGO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("png", ImageFormat::Png),
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("gif", ImageFormat::Gif),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    LOGO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of logo file extensions that have working decoders
/// compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Pure Rust decoder using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustDecoder;

impl RustDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterDecoder for RustDecoder {
    fn decode_sample(&self, path: &Path, max_size: u32) -> Result<RgbaSample, DecodeError> {
        let img = ImageReader::open(path)
            .map_err(DecodeError::Io)?
            .decode()
            .map_err(|e| {
                DecodeError::Decode(format!("Failed to decode {}: {}", path.display(), e))
            })?;

        // Fit within max_size on the longest edge, preserving aspect ratio.
        // Small inputs are scaled up to the bound as well.
        let sampled = img.resize(max_size, max_size, FilterType::Lanczos3);
        let rgba = sampled.to_rgba8();
        Ok(RgbaSample {
            width: rgba.width(),
            height: rgba.height(),
            pixels: rgba.into_raw(),
        })
    }
}
