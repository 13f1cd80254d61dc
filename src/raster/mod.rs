//! Raster decoding: turning logo files into bounded RGBA samples.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image` crate (PNG, JPEG, GIF, WebP) |
//! | **Resample** | `DynamicImage::resize` (Lanczos3) within the sample bound |
//!
//! The module is split into:
//! - **Decoder**: [`RasterDecoder`] trait, [`RgbaSample`], errors, test mock
//! - **RustDecoder**: production `image`-crate implementation

pub mod decoder;
pub mod rust_decoder;

pub use decoder::{DecodeError, RasterDecoder, RgbaSample};
pub use rust_decoder::{RustDecoder, supported_input_extensions};
