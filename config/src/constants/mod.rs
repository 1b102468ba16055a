//! Centralized configuration values shared across the KCL crates.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Tolerance for floating-point comparisons on coordinates and angles.
///
/// # Examples
/// ```
/// use config::constants::EPSILON;
/// assert!((0.1 + 0.2 - 0.3_f64).abs() < EPSILON);
/// ```
pub const EPSILON: f64 = 1.0e-9;

/// Number of decimals kept when a gesture coordinate becomes a literal.
///
/// Pointer positions carry sub-pixel noise; rounding keeps the generated
/// source readable and stable between drag steps.
///
/// # Examples
/// ```
/// use config::constants::COORDINATE_DECIMALS;
/// assert_eq!(COORDINATE_DECIMALS, 2);
/// ```
pub const COORDINATE_DECIMALS: u32 = 2;

// =============================================================================
// TAG NAMING CONSTANTS
// =============================================================================

/// Prefix of system-generated segment tags (`seg01`, `seg02`, ...).
///
/// # Examples
/// ```
/// use config::constants::TAG_PREFIX;
/// assert!(TAG_PREFIX.chars().all(|c| c.is_ascii_alphabetic()));
/// ```
pub const TAG_PREFIX: &str = "seg";

/// Minimum width of the zero-padded counter appended to [`TAG_PREFIX`].
///
/// # Examples
/// ```
/// use config::constants::{TAG_INDEX_DIGITS, TAG_PREFIX};
/// let first = format!("{TAG_PREFIX}{:0width$}", 1, width = TAG_INDEX_DIGITS);
/// assert_eq!(first, "seg01");
/// ```
pub const TAG_INDEX_DIGITS: usize = 2;

// =============================================================================
// RECURSION CONSTANTS
// =============================================================================

/// Remaining stack below which the parser grows a new stack segment.
///
/// # Examples
/// ```
/// use config::constants::STACKER_RED_ZONE_BYTES;
/// assert!(STACKER_RED_ZONE_BYTES >= 32 * 1024);
/// ```
pub const STACKER_RED_ZONE_BYTES: usize = 64 * 1024;

/// Size of each stack segment allocated by `stacker` for deeply nested
/// expressions.
///
/// # Examples
/// ```
/// use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
/// assert!(STACKER_STACK_SIZE_BYTES > STACKER_RED_ZONE_BYTES);
/// ```
pub const STACKER_STACK_SIZE_BYTES: usize = 1024 * 1024;

// =============================================================================
// HELPERS
// =============================================================================

/// Rounds `value` to `decimals` decimal places.
///
/// # Examples
/// ```
/// use config::constants::round_off;
/// assert_eq!(round_off(2.345678, 2), 2.35);
/// assert_eq!(round_off(-0.004, 2), 0.0);
/// ```
pub fn round_off(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    // Avoid printing "-0" for values that round to zero.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

// =============================================================================
// SKETCH CONFIG
// =============================================================================

/// Settings consumed by the sketch transform engine.
///
/// # Examples
/// ```
/// use config::constants::SketchConfig;
/// let config = SketchConfig::default();
/// assert_eq!(config.tag_name(3), "seg03");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SketchConfig {
    /// Prefix of generated tag names.
    pub tag_prefix: String,
    /// Zero-padding width of the tag counter.
    pub tag_digits: usize,
    /// Decimals kept on generated coordinate literals.
    pub coordinate_decimals: u32,
}

impl SketchConfig {
    /// Builds a configuration enforcing strict validation of every field.
    ///
    /// # Examples
    /// ```
    /// use config::constants::SketchConfig;
    /// let cfg = SketchConfig::new("edge", 3, 4).expect("valid config");
    /// assert_eq!(cfg.tag_name(7), "edge007");
    /// ```
    pub fn new(
        tag_prefix: impl Into<String>,
        tag_digits: usize,
        coordinate_decimals: u32,
    ) -> Result<Self, ConfigError> {
        let tag_prefix = tag_prefix.into();
        let valid_prefix = tag_prefix
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && tag_prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_prefix {
            return Err(ConfigError::InvalidTagPrefix(tag_prefix));
        }
        if tag_digits == 0 || tag_digits > 6 {
            return Err(ConfigError::InvalidTagDigits(tag_digits));
        }
        if coordinate_decimals > 10 {
            return Err(ConfigError::InvalidDecimals(coordinate_decimals));
        }
        Ok(Self {
            tag_prefix,
            tag_digits,
            coordinate_decimals,
        })
    }

    /// Formats the tag name for counter `index`.
    pub fn tag_name(&self, index: usize) -> String {
        format!("{}{:0width$}", self.tag_prefix, index, width = self.tag_digits)
    }

    /// Rounds a coordinate with the configured precision.
    pub fn round(&self, value: f64) -> f64 {
        round_off(value, self.coordinate_decimals)
    }
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            tag_prefix: TAG_PREFIX.to_string(),
            tag_digits: TAG_INDEX_DIGITS,
            coordinate_decimals: COORDINATE_DECIMALS,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the tag prefix is not a valid identifier start.
    InvalidTagPrefix(String),
    /// Raised when the tag counter width is zero or unreasonably large.
    InvalidTagDigits(usize),
    /// Raised when more decimals are requested than an `f64` can carry.
    InvalidDecimals(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTagPrefix(value) => {
                write!(f, "tag prefix must be an identifier: {value:?}")
            }
            ConfigError::InvalidTagDigits(value) => {
                write!(f, "tag digits must be within 1..=6: {value}")
            }
            ConfigError::InvalidDecimals(value) => {
                write!(f, "coordinate decimals must be <= 10: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
