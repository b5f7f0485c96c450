//! Horizontal scroll view: a fixed-width viewport over wider content.
//!
//! The view scrolls by drag or programmatically, either instantly or with an
//! eased animation advanced through [`Widget::tick`].

use flick_core::{
    widget::LayoutResult, AccessibleRole, Brick, BrickAssertion, BrickVerification, Canvas,
    Constraints, EasedValue, Easing, Event, PointerId, Rect, Size, TouchPhase, Transform2D,
    TypeId, Widget,
};
use std::any::Any;

/// Duration of a smooth scroll in seconds.
pub const DEFAULT_SMOOTH_SCROLL_SECS: f64 = 0.25;

const OFFSET_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    pointer: PointerId,
    start_x: f32,
    start_offset: f32,
}

/// Horizontally scrolling viewport over a single content widget.
///
/// Content is laid out at its measured width with its origin at zero and
/// painted shifted left by the scroll offset. The offset always stays within
/// `0..=max_scroll()`.
#[derive(Debug, Clone)]
pub struct HorizontalScrollView<C> {
    content: C,
    offset: f32,
    viewport_width: Option<f32>,
    enabled: bool,
    smooth_duration: f64,
    animation: Option<EasedValue>,
    drag: Option<Drag>,
    test_id_value: Option<String>,
    bounds: Rect,
}

impl<C: Widget> HorizontalScrollView<C> {
    /// Wrap `content` in a scroll view scrolled to the start.
    #[must_use]
    pub fn new(content: C) -> Self {
        Self {
            content,
            offset: 0.0,
            viewport_width: None,
            enabled: true,
            smooth_duration: DEFAULT_SMOOTH_SCROLL_SECS,
            animation: None,
            drag: None,
            test_id_value: None,
            bounds: Rect::default(),
        }
    }

    /// Fix the viewport width instead of taking the laid-out width.
    #[must_use]
    pub fn viewport_width(mut self, width: f32) -> Self {
        self.viewport_width = Some(width);
        self
    }

    /// Set the duration of smooth scrolls in seconds.
    #[must_use]
    pub fn smooth_scroll_duration(mut self, secs: f64) -> Self {
        self.smooth_duration = secs.max(0.0);
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// The scrolled content.
    #[must_use]
    pub const fn content(&self) -> &C {
        &self.content
    }

    /// Mutable access to the scrolled content.
    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    /// Fix or release the viewport width.
    pub fn set_viewport_width(&mut self, width: Option<f32>) {
        self.viewport_width = width;
        self.offset = self.clamp(self.offset);
    }

    /// Width of the visible window.
    #[must_use]
    pub fn viewport(&self) -> f32 {
        self.viewport_width.unwrap_or(self.bounds.width)
    }

    /// Unconstrained size of the content.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content.measure(Constraints::unbounded())
    }

    /// Largest valid offset.
    #[must_use]
    pub fn max_scroll(&self) -> f32 {
        (self.content_size().width - self.viewport()).max(0.0)
    }

    /// Current horizontal offset.
    #[must_use]
    pub const fn scroll_offset(&self) -> f32 {
        self.offset
    }

    /// Offset the view is at or animating towards.
    #[must_use]
    pub fn scroll_target(&self) -> f32 {
        self.animation
            .as_ref()
            .map_or(self.offset, |animation| animation.to as f32)
    }

    /// Whether a smooth scroll is in flight.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether a pointer is dragging the content.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether drag input is accepted.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Accept or ignore drag input. Disabling drops any drag in progress.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.drag = None;
        }
    }

    /// Jump to `x`, stopping any smooth scroll.
    pub fn scroll_to(&mut self, x: f32) {
        self.animation = None;
        self.offset = self.clamp(x);
    }

    /// Animate to `x`. A later call replaces the running animation.
    pub fn smooth_scroll_to(&mut self, x: f32) {
        let target = self.clamp(x);
        if (target - self.offset).abs() < OFFSET_EPSILON || self.smooth_duration <= 0.0 {
            self.scroll_to(target);
            return;
        }
        self.animation = Some(
            EasedValue::new(
                f64::from(self.offset),
                f64::from(target),
                self.smooth_duration,
            )
            .with_easing(Easing::EaseOut),
        );
    }

    /// Forget the current drag without moving.
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    fn clamp(&self, x: f32) -> f32 {
        if x.is_nan() {
            return 0.0;
        }
        x.clamp(0.0, self.max_scroll())
    }
}

impl<C: Widget + 'static> Widget for HorizontalScrollView<C> {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let content = self.content_size();
        let width = self.viewport_width.unwrap_or(content.width);
        constraints.constrain(Size::new(width, content.height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        let content = self.content_size();
        self.content
            .layout(Rect::new(0.0, 0.0, content.width, bounds.height));
        self.offset = self.clamp(self.offset);
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.push_clip(self.bounds);
        canvas.push_transform(Transform2D::translate(
            self.bounds.x - self.offset,
            self.bounds.y,
        ));
        self.content.paint(canvas);
        canvas.pop_transform();
        canvas.pop_clip();
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        let sample = event.pointer()?;
        match sample.phase {
            TouchPhase::Down => {
                if !self.enabled || self.drag.is_some() {
                    return None;
                }
                let position = sample.position?;
                if !self.bounds.contains_point(&position) {
                    return None;
                }
                // Grabbing the content stops a smooth scroll where it is
                self.animation = None;
                self.drag = Some(Drag {
                    pointer: sample.pointer,
                    start_x: position.x,
                    start_offset: self.offset,
                });
                None
            }
            TouchPhase::Move => {
                let drag = self.drag.filter(|d| d.pointer == sample.pointer)?;
                let position = sample.position?;
                let offset = self.clamp(drag.start_offset - (position.x - drag.start_x));
                if (offset - self.offset).abs() < f32::EPSILON {
                    return None;
                }
                self.offset = offset;
                Some(Box::new(Scrolled { offset }))
            }
            TouchPhase::Up | TouchPhase::Cancel => {
                if self.drag.is_some_and(|d| d.pointer == sample.pointer) {
                    self.drag = None;
                }
                None
            }
        }
    }

    fn tick(&mut self, dt: f64) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        animation.update(dt);
        let (value, done) = (animation.value() as f32, animation.is_complete());
        self.offset = self.clamp(value);
        if done {
            self.animation = None;
        }
        !done
    }

    fn visit_children<'a>(&'a self, visitor: &mut dyn FnMut(&'a dyn Widget)) {
        visitor(&self.content);
    }

    fn is_interactive(&self) -> bool {
        self.enabled
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::ScrollArea
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl<C: Widget> Brick for HorizontalScrollView<C> {
    fn brick_name(&self) -> &'static str {
        "HorizontalScrollView"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &[BrickAssertion::Custom("offset-within-content")]
    }

    fn verify(&self) -> BrickVerification {
        BrickVerification::run(self.assertions(), |_| {
            let max = self.max_scroll();
            if (0.0..=max + OFFSET_EPSILON).contains(&self.offset) {
                Ok(())
            } else {
                Err(format!("offset {} outside 0..={max}", self.offset))
            }
        })
    }
}

/// Message emitted when a drag moves the content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scrolled {
    /// New scroll offset
    pub offset: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Label, Row};
    use flick_core::{Point, RecordingCanvas};
    use proptest::prelude::*;

    fn block(width: f32) -> Label {
        let mut label = Label::new("");
        label.set_fixed_size(Some(Size::new(width, 50.0)));
        label
    }

    /// 98 + 68 + 98 wide content in a 166 wide window.
    fn strip() -> HorizontalScrollView<Row<Label>> {
        let row = Row::new().child(block(98.0)).child(block(68.0)).child(block(98.0));
        let mut view = HorizontalScrollView::new(row).viewport_width(166.0);
        view.layout(Rect::new(10.0, 0.0, 166.0, 50.0));
        view
    }

    #[test]
    fn test_max_scroll() {
        let view = strip();
        assert_eq!(view.content_size(), Size::new(264.0, 50.0));
        assert_eq!(view.max_scroll(), 98.0);
    }

    #[test]
    fn test_measure_uses_viewport_width() {
        let view = strip();
        assert_eq!(view.measure(Constraints::unbounded()), Size::new(166.0, 50.0));
    }

    #[test]
    fn test_scroll_to_clamps() {
        let mut view = strip();
        view.scroll_to(500.0);
        assert_eq!(view.scroll_offset(), 98.0);
        view.scroll_to(-5.0);
        assert_eq!(view.scroll_offset(), 0.0);
        view.scroll_to(f32::NAN);
        assert_eq!(view.scroll_offset(), 0.0);
    }

    #[test]
    fn test_smooth_scroll_reaches_target() {
        let mut view = strip();
        view.smooth_scroll_to(98.0);
        assert!(view.is_animating());
        assert_eq!(view.scroll_offset(), 0.0);
        assert_eq!(view.scroll_target(), 98.0);

        assert!(view.tick(0.1));
        let mid = view.scroll_offset();
        assert!(mid > 0.0 && mid < 98.0);

        assert!(!view.tick(1.0));
        assert_eq!(view.scroll_offset(), 98.0);
        assert!(!view.is_animating());
    }

    #[test]
    fn test_smooth_scroll_latest_call_wins() {
        let mut view = strip();
        view.smooth_scroll_to(98.0);
        view.tick(0.05);
        view.smooth_scroll_to(0.0);
        assert_eq!(view.scroll_target(), 0.0);
        while view.tick(0.05) {}
        assert_eq!(view.scroll_offset(), 0.0);
    }

    #[test]
    fn test_smooth_scroll_to_current_offset_is_instant() {
        let mut view = strip();
        view.smooth_scroll_to(0.0);
        assert!(!view.is_animating());
    }

    #[test]
    fn test_drag_moves_content() {
        let mut view = strip();
        view.event(&Event::touch_start(0, Point::new(100.0, 25.0)));
        assert!(view.is_dragging());

        let msg = view.event(&Event::touch_move(0, Point::new(70.0, 25.0)));
        let scrolled = msg.and_then(|m| m.downcast::<Scrolled>().ok());
        assert_eq!(scrolled.map(|s| s.offset), Some(30.0));

        view.event(&Event::touch_move(0, Point::new(-200.0, 25.0)));
        assert_eq!(view.scroll_offset(), 98.0);

        view.event(&Event::touch_end(0, Point::new(-200.0, 25.0)));
        assert!(!view.is_dragging());
    }

    #[test]
    fn test_drag_ignores_other_contacts() {
        let mut view = strip();
        view.event(&Event::touch_start(0, Point::new(100.0, 25.0)));
        view.event(&Event::touch_start(1, Point::new(120.0, 25.0)));
        view.event(&Event::touch_move(1, Point::new(20.0, 25.0)));
        assert_eq!(view.scroll_offset(), 0.0);
        view.event(&Event::touch_end(1, Point::new(20.0, 25.0)));
        assert!(view.is_dragging());
    }

    #[test]
    fn test_down_outside_bounds_ignored() {
        let mut view = strip();
        view.event(&Event::touch_start(0, Point::new(5.0, 25.0)));
        assert!(!view.is_dragging());
    }

    #[test]
    fn test_disabled_ignores_drag() {
        let mut view = strip();
        view.set_enabled(false);
        view.event(&Event::touch_start(0, Point::new(100.0, 25.0)));
        view.event(&Event::touch_move(0, Point::new(50.0, 25.0)));
        assert_eq!(view.scroll_offset(), 0.0);
        assert!(!view.is_interactive());
    }

    #[test]
    fn test_drag_stops_animation() {
        let mut view = strip();
        view.smooth_scroll_to(98.0);
        view.tick(0.1);
        let held = view.scroll_offset();
        view.event(&Event::touch_start(0, Point::new(100.0, 25.0)));
        assert!(!view.is_animating());
        assert!(!view.tick(0.1));
        assert_eq!(view.scroll_offset(), held);
    }

    #[test]
    fn test_paint_is_shifted_and_clipped() {
        let mut view = strip();
        view.scroll_to(98.0);
        let mut canvas = RecordingCanvas::new();
        view.content_mut().children_mut()[1].set_background(flick_core::Color::WHITE);
        view.paint(&mut canvas);

        // Middle block starts at 98 in content space
        assert_eq!(
            canvas.commands()[0].rect_bounds(),
            Some(Rect::new(10.0, 0.0, 68.0, 50.0))
        );
        assert_eq!(canvas.clip_depth(), 0);
        assert_eq!(canvas.transform_depth(), 0);
    }

    #[test]
    fn test_shrinking_content_reclamps_offset() {
        let mut view = strip();
        view.scroll_to(98.0);
        view.content_mut().children_mut()[2].set_fixed_size(Some(Size::new(10.0, 50.0)));
        view.layout(Rect::new(10.0, 0.0, 166.0, 50.0));
        assert_eq!(view.scroll_offset(), 10.0);
        assert!(view.verify().is_valid());
    }

    #[test]
    fn test_visit_children_yields_content() {
        let view = strip();
        let mut count = 0;
        view.visit_children(&mut |_| count += 1);
        assert_eq!(count, 1);
    }

    proptest! {
        #[test]
        fn prop_drag_keeps_offset_in_range(moves in prop::collection::vec(-400.0f32..400.0, 1..20)) {
            let mut view = strip();
            view.event(&Event::touch_start(0, Point::new(100.0, 25.0)));
            for x in moves {
                view.event(&Event::touch_move(0, Point::new(x, 25.0)));
                prop_assert!(view.scroll_offset() >= 0.0);
                prop_assert!(view.scroll_offset() <= view.max_scroll());
            }
        }
    }
}
