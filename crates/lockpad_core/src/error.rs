//! Lockpad error types

use thiserror::Error;

/// Configuration errors, raised once at construction or resize
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Grid dimension outside `1..=MAX_DIMENSION`
    #[error("grid dimension must be between 1 and {max}, got {0}", max = crate::grid::MAX_DIMENSION)]
    InvalidDimension(u32),

    /// An offset was negative
    #[error("offset `{field}` must not be negative, got {value}")]
    NegativeOffset { field: &'static str, value: f32 },

    /// A numeric option was NaN or infinite
    #[error("option `{field}` must be a finite number")]
    NonFiniteValue { field: &'static str },

    /// Surface has no area
    #[error("surface size {width}x{height} is not drawable")]
    InvalidSurface { width: f32, height: f32 },

    /// Surface too narrow for the requested dimension
    #[error("surface width {width} is too small for a {dimension}x{dimension} grid (radius would be 0)")]
    DegenerateGrid { width: f32, dimension: u32 },

    /// Unrecognized color token
    #[error("invalid color token: {0:?}")]
    InvalidColor(String),

    /// Unparseable font size
    #[error("invalid font size: {0:?}")]
    InvalidFontSize(String),

    /// Malformed TOML configuration
    #[error(transparent)]
    Parse(#[from] toml::de::Error),
}

/// Result type for lockpad construction
pub type Result<T> = std::result::Result<T, ConfigError>;
