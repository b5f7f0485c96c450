//! Flick toggle geometry: label, thumb and viewport sizes from the natural
//! sizes of the two labels.
//!
//! Both labels are widened to the larger of the two so the on and off
//! regions line up. The label keeps a minimum aspect ratio relative to its
//! natural height and a minimum height in density-independent pixels. The
//! thumb is a fixed fraction of the label width.

use flick_core::{DisplayMetrics, Size};
use serde::{Deserialize, Serialize};

/// Minimum label width per unit of natural label height.
pub const MIN_WIDTH_PER_HEIGHT: f32 = 57.0 / 29.0;

/// Thumb width as a fraction of the label width.
pub const THUMB_WIDTH_RATIO: f32 = 40.0 / 57.0;

/// Minimum label height in density-independent pixels.
pub const MIN_HEIGHT_DIP: f32 = 50.0;

/// Sizes and scroll offsets of a flick toggle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlickGeometry {
    /// Size shared by the on and off labels
    pub label: Size,
    /// Size of the thumb between them
    pub thumb: Size,
    /// Visible window: one label plus the thumb
    pub viewport: Size,
    /// Scroll offset showing the on label
    pub on_offset: f32,
    /// Scroll offset showing the off label
    pub off_offset: f32,
    /// Largest scroll offset
    pub max_scroll: f32,
}

impl FlickGeometry {
    /// Compute geometry from the natural sizes of the on and off labels.
    ///
    /// Label widths are rounded up to whole pixels so the off offset and the
    /// scroll range derived from the content stay equal. The aspect minimum
    /// uses the natural height, before the absolute minimum height is
    /// applied. Non-finite or negative input counts as zero.
    #[must_use]
    pub fn compute(on: Size, off: Size, metrics: &DisplayMetrics) -> Self {
        let mut width = sanitize(on.width).max(sanitize(off.width)).ceil();
        let mut height = sanitize(on.height).max(sanitize(off.height));

        width = width.max((MIN_WIDTH_PER_HEIGHT * height).floor());
        height = height.max(sanitize(metrics.dip(MIN_HEIGHT_DIP)));

        let thumb = Size::new((width * THUMB_WIDTH_RATIO).floor(), height);
        Self {
            label: Size::new(width, height),
            thumb,
            viewport: Size::new(width + thumb.width, height),
            on_offset: 0.0,
            off_offset: width,
            max_scroll: width,
        }
    }

    /// Geometry before any label has been measured.
    #[must_use]
    pub fn unmeasured(metrics: &DisplayMetrics) -> Self {
        Self::compute(Size::ZERO, Size::ZERO, metrics)
    }

    /// Scroll offset displaying the given state.
    #[must_use]
    pub const fn offset_for(&self, on: bool) -> f32 {
        if on {
            self.on_offset
        } else {
            self.off_offset
        }
    }

    /// Width of the scrolled strip: both labels and the thumb.
    #[must_use]
    pub fn content_width(&self) -> f32 {
        2.0f32.mul_add(self.label.width, self.thumb.width)
    }
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
