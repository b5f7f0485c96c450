//! Display density, dimension units and text measurement.

use crate::geometry::Size;
use serde::{Deserialize, Serialize};

/// Density information supplied by the host display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayMetrics {
    /// Pixels per density-independent pixel
    pub density: f32,
    /// Pixels per scaled pixel (density times the user's font scale)
    pub scaled_density: f32,
    /// Physical pixels per inch along x
    pub xdpi: f32,
}

impl DisplayMetrics {
    /// Baseline 160 dpi display with no font scaling.
    pub const BASELINE: Self = Self {
        density: 1.0,
        scaled_density: 1.0,
        xdpi: 160.0,
    };

    /// Metrics for a display of the given density with no font scaling.
    #[must_use]
    pub fn with_density(density: f32) -> Self {
        Self {
            density,
            scaled_density: density,
            xdpi: 160.0 * density,
        }
    }

    /// Apply a user font scale on top of the density.
    #[must_use]
    pub fn font_scale(mut self, scale: f32) -> Self {
        self.scaled_density = self.density * scale;
        self
    }

    /// Convert density-independent pixels to pixels.
    #[must_use]
    pub fn dip(&self, value: f32) -> f32 {
        TextUnit::Dip.to_px(value, self)
    }
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self::BASELINE
    }
}

/// Unit a dimension is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextUnit {
    /// Raw pixels
    Px,
    /// Density-independent pixels
    #[serde(alias = "dp")]
    Dip,
    /// Scaled pixels (density and font scale)
    #[default]
    Sp,
    /// Points, 1/72 inch
    Pt,
    /// Inches
    In,
    /// Millimetres
    Mm,
}

impl TextUnit {
    /// Convert a value in this unit to pixels.
    #[must_use]
    pub fn to_px(self, value: f32, metrics: &DisplayMetrics) -> f32 {
        match self {
            Self::Px => value,
            Self::Dip => value * metrics.density,
            Self::Sp => value * metrics.scaled_density,
            Self::Pt => value * metrics.xdpi / 72.0,
            Self::In => value * metrics.xdpi,
            Self::Mm => value * metrics.xdpi / 25.4,
        }
    }
}

/// Measures the content-fitting size of a single line of text.
///
/// Hosts with real font rasterizers plug their shaper in here.
pub trait TextMetrics: Send + Sync + std::fmt::Debug {
    /// Size of `text` rendered at `font_size` pixels.
    fn measure(&self, text: &str, font_size: f32) -> Size;
}

/// Font-free estimate: fixed advance per character and a line-height factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatedTextMetrics {
    /// Advance of one character as a fraction of the font size
    pub char_width: f32,
    /// Line height as a multiple of the font size
    pub line_height: f32,
}

impl Default for EstimatedTextMetrics {
    fn default() -> Self {
        Self {
            char_width: 0.6,
            line_height: 1.2,
        }
    }
}

impl TextMetrics for EstimatedTextMetrics {
    fn measure(&self, text: &str, font_size: f32) -> Size {
        let font_size = font_size.max(0.0);
        let chars = text.chars().count() as f32;
        Size::new(
            chars * font_size * self.char_width,
            font_size * self.line_height,
        )
    }
}
