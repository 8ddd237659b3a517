//! Configuration error types
//!
//! The simulation itself never fails; only startup configuration can.

use thiserror::Error;

/// Errors raised while loading or validating a [`crate::SimConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A size, rate or velocity that must be strictly positive was not.
    #[error("{field} must be > 0 (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    /// A float field held NaN or infinity.
    #[error("{field} must be finite (got {value})")]
    NonFinite { field: &'static str, value: f32 },

    /// The gap does not fit inside the play field.
    #[error("gap_size {gap_size} must be smaller than field_height {field_height}")]
    GapTooLarge { gap_size: f32, field_height: f32 },

    /// Gap plus both margins leaves no valid placement.
    #[error(
        "gap_size {gap_size} plus 2 x gap_margin {gap_margin} exceeds field_height {field_height}"
    )]
    NoRoomForGap {
        gap_size: f32,
        gap_margin: f32,
        field_height: f32,
    },

    /// A value lies outside its allowed interval.
    #[error("{field} = {value} outside allowed range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// The config file could not be read.
    #[error("read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config text was not valid JSON for [`crate::SimConfig`].
    #[error("parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
