//! # Config Crate
//!
//! Centralized configuration constants for the KCL language core.
//! Tunable values used by the parser and the sketch transform engine are
//! defined here so that no crate scatters its own literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{round_off, COORDINATE_DECIMALS, EPSILON};
//!
//! let snapped = round_off(1.23456, COORDINATE_DECIMALS);
//! assert!((snapped - 1.23).abs() < EPSILON);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Validated Overrides**: `SketchConfig` rejects values the engine cannot honour

pub mod constants;
