//! Run configuration module.
//!
//! Handles loading, validating, and merging `config.toml` files. Stock
//! defaults are overridden by an optional config file placed in the logo
//! source directory, so a logo set travels with its own tuning.
//!
//! ## Config File Location
//!
//! Place `config.toml` next to the logo files:
//!
//! ```text
//! logos/
//! ├── config.toml   # Overrides stock defaults for this set
//! ├── acme.png
//! ├── globex.webp
//! └── initech.jpg
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [analysis]
//! sample_max_size = 200     # Working-sample bound in pixels (longest edge)
//! contrast_threshold = 10   # Content cutoff for alpha and color distance (0-255)
//!
//! [sizing]
//! base_size = 48            # Display size of a square (1:1) logo, in pixels
//! scale_factor = 0.5        # Aspect exponent: 0 = uniform width, 1 = uniform height
//! density_factor = 0.5      # Strength of ink-density compensation (0 disables)
//! density_dampening = 0.5   # Softens the density correction curve
//! reference_density = 0.35  # Measured density that maps to no correction
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse; override just the values you want:
//!
//! ```toml
//! # Only raise the base size
//! [sizing]
//! base_size = 64
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Run configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BalanceConfig {
    /// Raster analysis settings (sampling bound, content threshold).
    pub analysis: AnalysisConfig,
    /// Size normalization tuning (base size, exponents, density reference).
    pub sizing: SizingConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl BalanceConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.sample_max_size == 0 {
            return Err(ConfigError::Validation(
                "analysis.sample_max_size must be at least 1".into(),
            ));
        }
        if self.sizing.base_size == 0 {
            return Err(ConfigError::Validation(
                "sizing.base_size must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.sizing.scale_factor) {
            return Err(ConfigError::Validation(
                "sizing.scale_factor must be 0-1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.sizing.density_factor) {
            return Err(ConfigError::Validation(
                "sizing.density_factor must be 0-1".into(),
            ));
        }
        if self.sizing.density_dampening < 0.0 {
            return Err(ConfigError::Validation(
                "sizing.density_dampening must not be negative".into(),
            ));
        }
        if self.sizing.reference_density <= 0.0 || self.sizing.reference_density > 1.0 {
            return Err(ConfigError::Validation(
                "sizing.reference_density must be within (0, 1]".into(),
            ));
        }
        Ok(())
    }
}

/// Raster analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Longest edge of the decoded working sample, in pixels. Inputs are
    /// resampled to fit this bound before analysis.
    pub sample_max_size: u32,
    /// Cutoff for counting a pixel as content (0-255). Applied to alpha,
    /// and to per-channel distance from the background in color mode.
    pub contrast_threshold: u8,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_max_size: 200,
            contrast_threshold: 10,
        }
    }
}

/// Size normalization tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizingConfig {
    /// Display size of a square (1:1) logo, in pixels.
    pub base_size: u32,
    /// Aspect exponent: 0 gives every logo the same width, 1 the same
    /// height, 0.5 balances between the two.
    pub scale_factor: f64,
    /// Strength of ink-density compensation. 0 disables it; as the value
    /// rises, dense solid marks shrink and airy outlined marks grow.
    pub density_factor: f64,
    /// Softens the density correction curve (multiplied into the exponent
    /// together with `density_factor`).
    pub density_dampening: f64,
    /// Measured density that maps to no correction at all.
    pub reference_density: f64,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            base_size: 48,
            scale_factor: 0.5,
            density_factor: 0.5,
            density_dampening: 0.5,
            reference_density: 0.35,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel analysis workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BalanceConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BalanceConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BalanceConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(source: &Path) -> Result<BalanceConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(source)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Logofit Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place config.toml in the logo source directory, next to the images.
# Each run picks it up automatically. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Raster analysis
# ---------------------------------------------------------------------------
[analysis]
# Longest edge of the decoded working sample, in pixels. Inputs are
# resampled to fit this bound before analysis; larger values cost time
# without changing the measurements much.
sample_max_size = 200

# Cutoff for counting a pixel as content (0-255). Applied to the alpha
# channel, and to per-channel distance from the background when the
# image has no transparency.
contrast_threshold = 10

# ---------------------------------------------------------------------------
# Size normalization
# ---------------------------------------------------------------------------
[sizing]
# Display size of a square (1:1) logo, in pixels.
base_size = 48

# Aspect exponent: 0 gives every logo the same width, 1 the same height,
# 0.5 balances between the two.
scale_factor = 0.5

# Strength of ink-density compensation. 0 disables it; as the value
# rises, dense solid marks shrink and airy outlined marks grow.
density_factor = 0.5

# Softens the density correction curve.
density_dampening = 0.5

# Measured density that maps to no correction at all.
reference_density = 0.35

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel analysis workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
