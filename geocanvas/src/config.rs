// Copyright 2025 the GeoCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget configuration.

use geocanvas_geometry::FillRule;
use geocanvas_view::{DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, DEFAULT_SCALE};
use kurbo::Point;
use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a [`GeoCanvasConfig`] cannot configure a widget.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric field was NaN or infinite.
    #[error("`{field}` must be a finite number, got {value}")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// The value found.
        value: f64,
    },
    /// The scale bounds are empty or not positive.
    #[error("scale bounds must satisfy 0 < minScale <= maxScale, got [{min}, {max}]")]
    ScaleBounds {
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
    /// The initial scale is outside the bounds.
    #[error("initial scale {scale} lies outside [{min}, {max}]")]
    ScaleOutOfRange {
        /// Configured initial scale.
        scale: f64,
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
    /// The default line width is negative.
    #[error("lineWidth must not be negative, got {0}")]
    NegativeLineWidth(f64),
    /// The background is not a CSS color string.
    #[error("`{0}` is not a CSS color")]
    Color(String),
    /// The configuration could not be parsed.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serializable name of a [`FillRule`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillRuleName {
    /// Nonzero winding, the canvas default.
    #[default]
    NonZero,
    /// Even-odd parity.
    EvenOdd,
}

impl From<FillRuleName> for FillRule {
    fn from(name: FillRuleName) -> Self {
        match name {
            FillRuleName::NonZero => Self::NonZero,
            FillRuleName::EvenOdd => Self::EvenOdd,
        }
    }
}

/// Construction-time settings of a [`crate::GeoCanvas`].
///
/// Every field is optional when deserializing; missing fields take the
/// [`Default`] values. JSON keys use camelCase (`minScale`,
/// `backgroundColor`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeoCanvasConfig {
    /// Initial view center as `[lon, lat]`.
    pub center: [f64; 2],
    /// Initial scale in degrees per device pixel.
    pub scale: f64,
    /// Lower scale bound (most zoomed in).
    pub min_scale: f64,
    /// Upper scale bound (most zoomed out).
    pub max_scale: f64,
    /// CSS color the surface is cleared to before each full redraw.
    pub background_color: String,
    /// Default outline width, in logical pixels.
    pub line_width: f64,
    /// Fill rule for polygon fills and the matching hit tests.
    pub fill_rule: FillRuleName,
    /// Whether drag-to-pan and wheel zoom are enabled.
    pub draggable: bool,
    /// Whether clicks are latched.
    pub clickable: bool,
    /// Whether hover positions are latched.
    pub hoverable: bool,
}

impl Default for GeoCanvasConfig {
    fn default() -> Self {
        Self {
            center: [138.0, 36.0],
            scale: DEFAULT_SCALE,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            background_color: "#fff".to_owned(),
            line_width: 1.0,
            fill_rule: FillRuleName::NonZero,
            draggable: false,
            clickable: false,
            hoverable: false,
        }
    }
}

impl GeoCanvasConfig {
    /// Parses a configuration from JSON and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for values the widget cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("center[0]", self.center[0]),
            ("center[1]", self.center[1]),
            ("scale", self.scale),
            ("minScale", self.min_scale),
            ("maxScale", self.max_scale),
            ("lineWidth", self.line_width),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        if self.min_scale <= 0.0 || self.min_scale > self.max_scale {
            return Err(ConfigError::ScaleBounds {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if self.scale < self.min_scale || self.scale > self.max_scale {
            return Err(ConfigError::ScaleOutOfRange {
                scale: self.scale,
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if self.line_width < 0.0 {
            return Err(ConfigError::NegativeLineWidth(self.line_width));
        }
        self.background()?;
        Ok(())
    }

    /// Returns the initial view center.
    #[must_use]
    pub fn center_point(&self) -> Point {
        Point::new(self.center[0], self.center[1])
    }

    /// Parses [`GeoCanvasConfig::background_color`].
    pub fn background(&self) -> Result<Color, ConfigError> {
        parse_css_color(&self.background_color)
    }
}

/// Parses a CSS color string such as `"#fff"` or `"rgb(0 128 255)"`.
pub(crate) fn parse_css_color(css: &str) -> Result<Color, ConfigError> {
    parse_color(css)
        .map(|color| color.to_alpha_color::<Srgb>())
        .map_err(|_| ConfigError::Color(css.to_owned()))
}
