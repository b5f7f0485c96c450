//! Draw commands: the output of a paint pass.

use crate::color::Color;
use crate::geometry::{Point, Rect};
use crate::widget::TextStyle;
use serde::{Deserialize, Serialize};

/// Stroke style for outlines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Fill and/or stroke for a box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Fill color
    pub fill: Option<Color>,
    /// Outline
    pub stroke: Option<StrokeStyle>,
}

impl BoxStyle {
    /// Filled box.
    #[must_use]
    pub const fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    /// Outlined box.
    #[must_use]
    pub const fn stroke(style: StrokeStyle) -> Self {
        Self {
            fill: None,
            stroke: Some(style),
        }
    }
}

/// 2D affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Matrix elements [a, b, c, d, e, f] for:
    /// | a c e |
    /// | b d f |
    /// | 0 0 1 |
    pub matrix: [f32; 6],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        matrix: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    /// Create a translation transform.
    #[must_use]
    pub const fn translate(x: f32, y: f32) -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    /// Create a scale transform.
    #[must_use]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self {
            matrix: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Chain transforms: first apply self, then apply other.
    ///
    /// For point p: `a.then(b).apply(p)` == `b.apply(a.apply(p))`
    #[must_use]
    pub fn then(&self, other: &Self) -> Self {
        let a = other.matrix;
        let b = self.matrix;
        Self {
            matrix: [
                a[0].mul_add(b[0], a[2] * b[1]),
                a[1].mul_add(b[0], a[3] * b[1]),
                a[0].mul_add(b[2], a[2] * b[3]),
                a[1].mul_add(b[2], a[3] * b[3]),
                a[0].mul_add(b[4], a[2].mul_add(b[5], a[4])),
                a[1].mul_add(b[4], a[3].mul_add(b[5], a[5])),
            ],
        }
    }

    /// Transform a point.
    #[must_use]
    pub fn apply(&self, point: Point) -> Point {
        let m = self.matrix;
        Point::new(
            m[0].mul_add(point.x, m[2].mul_add(point.y, m[4])),
            m[1].mul_add(point.x, m[3].mul_add(point.y, m[5])),
        )
    }

    /// Transform an axis-aligned rectangle (translation and scale only).
    #[must_use]
    pub fn apply_rect(&self, rect: Rect) -> Rect {
        let origin = self.apply(rect.origin());
        Rect::new(
            origin.x,
            origin.y,
            rect.width * self.matrix[0],
            rect.height * self.matrix[3],
        )
    }
}

/// Drawing primitive - all rendering reduces to these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Draw a rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Box style
        style: BoxStyle,
    },

    /// Draw text
    Text {
        /// Text content
        content: String,
        /// Position of the top-left corner of the text
        position: Point,
        /// Text style
        style: TextStyle,
    },
}

impl DrawCommand {
    /// Create a filled rectangle.
    #[must_use]
    pub const fn filled_rect(bounds: Rect, color: Color) -> Self {
        Self::Rect {
            bounds,
            style: BoxStyle::fill(color),
        }
    }

    /// Bounds of a rectangle command.
    #[must_use]
    pub const fn rect_bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect { bounds, .. } => Some(*bounds),
            Self::Text { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_translate_apply() {
        let t = Transform2D::translate(10.0, 20.0);
        assert_eq!(t.apply(Point::new(1.0, 2.0)), Point::new(11.0, 22.0));
    }

    #[test]
    fn test_transform_then_composes_translations() {
        let t = Transform2D::translate(5.0, 0.0).then(&Transform2D::translate(-20.0, 3.0));
        assert_eq!(t.apply(Point::ORIGIN), Point::new(-15.0, 3.0));
    }

    #[test]
    fn test_transform_scale_then_translate() {
        let t = Transform2D::scale(2.0, 2.0).then(&Transform2D::translate(1.0, 1.0));
        assert_eq!(t.apply(Point::new(3.0, 4.0)), Point::new(7.0, 9.0));
    }

    #[test]
    fn test_apply_rect() {
        let t = Transform2D::translate(-30.0, 5.0);
        let r = t.apply_rect(Rect::new(40.0, 0.0, 10.0, 10.0));
        assert_eq!(r, Rect::new(10.0, 5.0, 10.0, 10.0));
    }

    #[test]
    fn test_filled_rect_bounds() {
        let cmd = DrawCommand::filled_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::WHITE);
        assert_eq!(cmd.rect_bounds(), Some(Rect::new(0.0, 0.0, 4.0, 4.0)));
    }
}
