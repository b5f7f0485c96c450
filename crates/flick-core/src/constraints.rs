//! Size limits handed down during measure.
//!
//! The toggle only ever needs three shapes: the host's loose box, an
//! unbounded box for wrap-content labels, and a row's "any width, at most
//! this tall" box.

use crate::geometry::Size;
use serde::{Deserialize, Serialize};

/// Minimum and maximum size a widget may take.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Minimum width
    pub min_width: f32,
    /// Maximum width
    pub max_width: f32,
    /// Minimum height
    pub min_height: f32,
    /// Maximum height
    pub max_height: f32,
}

impl Constraints {
    /// Explicit limits.
    #[must_use]
    pub const fn new(min_width: f32, max_width: f32, min_height: f32, max_height: f32) -> Self {
        Self {
            min_width,
            max_width,
            min_height,
            max_height,
        }
    }

    /// Anything from zero up to `size`, the box a host viewport offers.
    #[must_use]
    pub const fn loose(size: Size) -> Self {
        Self::new(0.0, size.width, 0.0, size.height)
    }

    /// No limits: labels report their natural size.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self::new(0.0, f32::INFINITY, 0.0, f32::INFINITY)
    }

    /// Any width, at most `max_height` tall. Row children are measured this
    /// way so a scrolled strip can be wider than its viewport.
    #[must_use]
    pub const fn free_width(max_height: f32) -> Self {
        Self::new(0.0, f32::INFINITY, 0.0, max_height)
    }

    /// Fit `size` into the limits. When a minimum exceeds its maximum the
    /// maximum wins; NaN becomes the minimum.
    #[must_use]
    pub fn constrain(&self, size: Size) -> Size {
        Size::new(
            fit(size.width, self.min_width, self.max_width),
            fit(size.height, self.min_height, self.max_height),
        )
    }
}

fn fit(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

impl Default for Constraints {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_loose_caps_at_viewport() {
        let c = Constraints::loose(Size::new(400.0, 200.0));
        assert_eq!(c.constrain(Size::new(500.0, 60.0)), Size::new(400.0, 60.0));
        assert_eq!(c.constrain(Size::new(100.0, 60.0)), Size::new(100.0, 60.0));
    }

    #[test]
    fn test_unbounded_keeps_natural_size() {
        let c = Constraints::unbounded();
        assert_eq!(c.constrain(Size::new(1e6, 3.0)), Size::new(1e6, 3.0));
        assert_eq!(Constraints::default(), c);
    }

    #[test]
    fn test_free_width_limits_height_only() {
        let c = Constraints::free_width(50.0);
        assert_eq!(c.constrain(Size::new(143.0, 80.0)), Size::new(143.0, 50.0));
    }

    #[test]
    fn test_inverted_limits_prefer_max() {
        let c = Constraints::new(100.0, 40.0, 0.0, 10.0);
        assert_eq!(c.constrain(Size::new(70.0, 5.0)), Size::new(40.0, 5.0));
    }

    #[test]
    fn test_nan_takes_minimum() {
        let c = Constraints::new(10.0, 20.0, 0.0, 5.0);
        assert_eq!(c.constrain(Size::new(f32::NAN, 1.0)), Size::new(10.0, 1.0));
    }

    proptest! {
        #[test]
        fn prop_loose_result_fits(
            w in 0.0f32..1000.0,
            h in 0.0f32..1000.0,
            max_w in 1.0f32..500.0,
            max_h in 1.0f32..500.0,
        ) {
            let c = Constraints::loose(Size::new(max_w, max_h));
            let s = c.constrain(Size::new(w, h));
            prop_assert!(s.width <= max_w && s.width >= 0.0);
            prop_assert!(s.height <= max_h && s.height >= 0.0);
        }
    }
}
