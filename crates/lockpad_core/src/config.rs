//! Widget configuration
//!
//! Options are resolved once, at construction: [`LockConfig::default`] is
//! overlaid by a user-supplied [`PartialLockConfig`] and the result is
//! validated. The resolved [`LockConfig`] is never mutated afterwards.
//!
//! ```
//! use lockpad_core::config::LockConfig;
//!
//! let config = LockConfig::from_toml_str(
//!     r##"
//!     normal_style = "#ffffff"
//!     font_size = "24px"
//!
//!     [circle]
//!     num = 4
//!     "##,
//! )
//! .unwrap();
//! assert_eq!(config.circle.num, 4);
//! assert_eq!(config.font_size, 24.0);
//! ```

use serde::Deserialize;

use crate::color::Color;
use crate::error::{ConfigError, Result};
use crate::grid::MAX_DIMENSION;

/// Default title shown while the lock is waiting for input
pub const DEFAULT_TITLE: &str = "请解锁";

/// Acceptance region used by the hit tester
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitShape {
    /// Independent per-axis test, `|dx| < r && |dy| < r`
    #[default]
    Square,
    /// Euclidean test, `dx² + dy² < r²`
    Circle,
}

/// Title text placement
#[derive(Clone, Debug, PartialEq)]
pub struct TextConfig {
    pub title: String,
    /// Horizontal position of the title; centered when `None`
    pub offset_x: Option<f32>,
    /// Baseline of the title
    pub offset_y: f32,
    pub max_width: f32,
}

/// Grid of targets
#[derive(Clone, Debug, PartialEq)]
pub struct CircleConfig {
    /// Cells per side
    pub num: u32,
    /// Vertical offset of the whole grid
    pub offset_y: f32,
}

/// Resolved, validated configuration
#[derive(Clone, Debug, PartialEq)]
pub struct LockConfig {
    pub text: TextConfig,
    pub circle: CircleConfig,
    pub normal_color: Color,
    pub error_color: Color,
    /// Font size in pixels
    pub font_size: f32,
    pub hit_shape: HitShape,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            text: TextConfig {
                title: DEFAULT_TITLE.to_string(),
                offset_x: None,
                offset_y: 100.0,
                max_width: 1000.0,
            },
            circle: CircleConfig {
                num: 3,
                offset_y: 200.0,
            },
            normal_color: Color::WHITE,
            error_color: Color::RED,
            font_size: 20.0,
            hit_shape: HitShape::Square,
        }
    }
}

impl LockConfig {
    /// Overlay `partial` onto the defaults and validate
    pub fn resolve(partial: PartialLockConfig) -> Result<Self> {
        Self::default().overlay(partial)
    }

    /// Parse a TOML options document and resolve it against the defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let partial: PartialLockConfig = toml::from_str(source)?;
        Self::resolve(partial)
    }

    /// Overlay `partial` onto this configuration and validate the result
    pub fn overlay(mut self, partial: PartialLockConfig) -> Result<Self> {
        if let Some(text) = partial.text {
            if let Some(title) = text.title {
                self.text.title = title;
            }
            if text.offset_x.is_some() {
                self.text.offset_x = text.offset_x;
            }
            if let Some(offset_y) = text.offset_y {
                self.text.offset_y = offset_y;
            }
            if let Some(max_width) = text.text_max_width {
                self.text.max_width = max_width;
            }
        }
        if let Some(circle) = partial.circle {
            if let Some(num) = circle.num {
                self.circle.num = num;
            }
            if let Some(offset_y) = circle.offset_y {
                self.circle.offset_y = offset_y;
            }
        }
        if let Some(token) = partial.normal_style {
            self.normal_color = Color::parse(&token)?;
        }
        if let Some(token) = partial.error_style {
            self.error_color = Color::parse(&token)?;
        }
        if let Some(size) = partial.font_size {
            self.font_size = size.to_px()?;
        }
        if let Some(shape) = partial.hit_shape {
            self.hit_shape = shape;
        }

        self.validate()?;
        Ok(self)
    }

    /// Check the invariants a usable configuration must hold
    pub fn validate(&self) -> Result<()> {
        if self.circle.num == 0 || self.circle.num > MAX_DIMENSION {
            return Err(ConfigError::InvalidDimension(self.circle.num));
        }
        non_negative("circle.offset_y", self.circle.offset_y)?;
        non_negative("text.offset_y", self.text.offset_y)?;
        if let Some(offset_x) = self.text.offset_x {
            non_negative("text.offset_x", offset_x)?;
        }
        non_negative("text.text_max_width", self.text.max_width)?;
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ConfigError::InvalidFontSize(self.font_size.to_string()));
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() {
        return Err(ConfigError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ConfigError::NegativeOffset { field, value });
    }
    Ok(())
}

/// Font size as supplied by the user: `20`, `"20"` or `"20px"`
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FontSize {
    Px(f32),
    Css(String),
}

impl FontSize {
    pub fn to_px(&self) -> Result<f32> {
        let px = match self {
            FontSize::Px(px) => *px,
            FontSize::Css(text) => {
                let trimmed = text.trim();
                let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
                number
                    .parse::<f32>()
                    .map_err(|_| ConfigError::InvalidFontSize(text.clone()))?
            }
        };
        if !px.is_finite() || px <= 0.0 {
            return Err(ConfigError::InvalidFontSize(format!("{px}")));
        }
        Ok(px)
    }
}

/// User-supplied text options; unset fields keep their defaults
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PartialTextConfig {
    pub title: Option<String>,
    pub offset_x: Option<f32>,
    pub offset_y: Option<f32>,
    #[serde(alias = "textMaxWidth")]
    pub text_max_width: Option<f32>,
}

/// User-supplied grid options; unset fields keep their defaults
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PartialCircleConfig {
    pub num: Option<u32>,
    pub offset_y: Option<f32>,
}

/// User-supplied options, deserializable from TOML or JSON
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PartialLockConfig {
    pub text: Option<PartialTextConfig>,
    pub circle: Option<PartialCircleConfig>,
    #[serde(alias = "normalStyle")]
    pub normal_style: Option<String>,
    #[serde(alias = "errorStyle")]
    pub error_style: Option<String>,
    #[serde(alias = "fontSize")]
    pub font_size: Option<FontSize>,
    #[serde(alias = "hitShape")]
    pub hit_shape: Option<HitShape>,
}
