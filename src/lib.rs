//! # logofit
//!
//! Perceptual size normalization for heterogeneous logo sets.
//!
//! Render a wall of partner logos at one fixed pixel size and they will not
//! look the same size: a wide wordmark reads larger than a square emblem, a
//! dense solid mark reads heavier than an airy outline, and a logo whose
//! visual mass sits off-center looks misaligned even when its bounding box
//! is centered. logofit measures each logo raster and computes per-logo
//! display dimensions, corrected for aspect and ink density, plus offsets
//! that center the visual mass.
//!
//! # Architecture: Measure, Then Size
//!
//! Every file moves through the same three steps:
//!
//! ```text
//! 1. Decode     logo file  →  RGBA sample       (bounded working copy)
//! 2. Analyze    sample     →  LogoMetrics       (ratio, density, visual center)
//! 3. Normalize  metrics    →  LogoDimensions    (width, height, offsets)
//! ```
//!
//! Each step is a pure function over the previous step's output, so unit
//! tests exercise the geometry math on synthetic pixel buffers without
//! touching the filesystem, and the batch driver stays a thin loop.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`raster`] | Decodes logo files into bounded RGBA samples via the `image` crate |
//! | [`analysis`] | Content detection, perceptual metrics, and size normalization |
//! | [`batch`] | Directory driver: parallel per-file analysis, skip handling, inspect |
//! | [`config`] | `config.toml` loading, validation, and merging over stock defaults |
//! | [`output`] | CLI output formatting for the analyze, check, and inspect commands |
//!
//! # Design Decisions
//!
//! ## Bounded Working Sample
//!
//! Analysis never runs on full-resolution pixels. The decoder resamples each
//! logo to fit within `sample_max_size` (default 200px) on the longest edge
//! using Lanczos3. Every metric is a ratio or a fraction of the content box,
//! so the numbers are effectively scale-invariant, and a 4000px source costs
//! the same to measure as a 200px one.
//!
//! ## Two Detection Modes, One Predicate
//!
//! When an image carries real transparency, alpha is the authoritative
//! content signal. Fully opaque images fall back to color contrast against a
//! background estimated from the four corner pixels. Both modes share a
//! single per-pixel predicate, so the bounding box, the visual center, and
//! the density never disagree about which pixels count as content.
//!
//! ## Density Is Judged Against White
//!
//! Ink density compares logos to each other, so fill is classified against
//! plain white rather than each logo's own estimated background. A shared
//! reference keeps a mark on a dark card and the same mark on a white card
//! from reporting wildly different densities for the same amount of ink.
//!
//! ## Failures Skip, Never Abort
//!
//! A batch over hundreds of marketing-supplied files will contain corrupt
//! and empty ones. A file that fails to decode, or contains no detectable
//! content, is dropped from the artifact and reported with its reason; the
//! consuming page simply falls back to its default size for missing
//! entries. One bad file never costs the rest of the run.
//!
//! ## Stable JSON Artifact
//!
//! The analyze command writes a single JSON object mapping file name to
//! `{width, height, offsetX, offsetY}`. Keys are kept in a `BTreeMap` so
//! the artifact is byte-stable across runs regardless of rayon's worker
//! scheduling, which keeps it diffable in version control.

pub mod analysis;
pub mod batch;
pub mod config;
pub mod output;
pub mod raster;

#[cfg(test)]
pub(crate) mod test_helpers;
