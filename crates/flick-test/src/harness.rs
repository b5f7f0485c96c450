//! Test harness for flick widgets.
//!
//! The harness owns a root widget, lays it out inside a viewport, feeds it
//! touch and mouse events, advances animation frames and collects the
//! messages the widget emits.

use crate::selector::Selector;
use flick_core::{
    BrickAssertion, Constraints, Event, MouseButton, Point, RecordingCanvas, Rect, Size, Widget,
};
use log::trace;
use std::any::Any;

/// Frame interval used by [`Harness::settle`].
pub const FRAME_SECS: f64 = 1.0 / 60.0;

/// Upper bound on frames [`Harness::settle`] runs before giving up.
pub const MAX_SETTLE_FRAMES: usize = 600;

const FINGER: u32 = 0;

/// A failed brick assertion found by [`Harness::verify_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Brick that failed
    pub brick: &'static str,
    /// Test ID of the failing widget, if any
    pub test_id: Option<String>,
    /// Assertion that failed
    pub assertion: BrickAssertion,
    /// Reason given by the brick
    pub reason: String,
}

/// Test harness for interacting with a widget.
pub struct Harness<W> {
    /// Root widget being tested
    root: W,
    /// Current viewport
    viewport: Rect,
    /// Messages emitted by the root
    messages: Vec<Box<dyn Any + Send>>,
}

impl<W: Widget> Harness<W> {
    /// Create a harness with a 400x200 viewport and lay the root out in it.
    pub fn new(root: W) -> Self {
        let mut harness = Self {
            root,
            viewport: Rect::new(0.0, 0.0, 400.0, 200.0),
            messages: Vec::new(),
        };
        harness.layout();
        harness
    }

    /// Set the viewport size and lay out again.
    #[must_use]
    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Rect::new(0.0, 0.0, width, height);
        self.layout();
        self
    }

    /// The root widget.
    pub const fn widget(&self) -> &W {
        &self.root
    }

    /// Mutable access to the root widget. Call [`Harness::layout`] after
    /// size-affecting changes.
    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.root
    }

    /// Give the root widget back.
    pub fn into_inner(self) -> W {
        self.root
    }

    // === Frames ===

    /// Measure the root loosely against the viewport and lay it out at the
    /// viewport origin.
    pub fn layout(&mut self) -> &mut Self {
        let size = self
            .root
            .measure(Constraints::loose(self.viewport.size()));
        self.root
            .layout(Rect::from_size(size).with_origin(self.viewport.origin()));
        self
    }

    /// Size the root was last laid out at.
    pub fn root_size(&self) -> Size {
        self.root.bounds().size()
    }

    /// Advance animations by `dt` seconds. Returns whether more frames are
    /// needed.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.root.tick(dt)
    }

    /// Run frames until animations finish. Returns the number of frames run.
    ///
    /// # Panics
    ///
    /// Panics if the root is still animating after [`MAX_SETTLE_FRAMES`].
    pub fn settle(&mut self) -> usize {
        for frame in 1..=MAX_SETTLE_FRAMES {
            if !self.root.tick(FRAME_SECS) {
                return frame;
            }
        }
        panic!("widget still animating after {MAX_SETTLE_FRAMES} frames");
    }

    /// Paint the root into a fresh recording canvas.
    pub fn paint(&self) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new();
        self.root.paint(&mut canvas);
        canvas
    }

    // === Event Simulation ===

    /// Deliver one event to the root, keeping any message it emits.
    pub fn dispatch(&mut self, event: &Event) -> &mut Self {
        trace!("harness dispatch {event:?}");
        if let Some(message) = self.root.event(event) {
            self.messages.push(message);
        }
        self
    }

    /// Put a finger down.
    pub fn touch_down(&mut self, x: f32, y: f32) -> &mut Self {
        self.dispatch(&Event::touch_start(FINGER, Point::new(x, y)))
    }

    /// Move the finger.
    pub fn touch_move(&mut self, x: f32, y: f32) -> &mut Self {
        self.dispatch(&Event::touch_move(FINGER, Point::new(x, y)))
    }

    /// Lift the finger.
    pub fn touch_up(&mut self, x: f32, y: f32) -> &mut Self {
        self.dispatch(&Event::touch_end(FINGER, Point::new(x, y)))
    }

    /// Let the system take the finger away.
    pub fn touch_cancel(&mut self) -> &mut Self {
        self.dispatch(&Event::touch_cancel(FINGER))
    }

    /// Tap at a point.
    pub fn tap_at(&mut self, x: f32, y: f32) -> &mut Self {
        self.touch_down(x, y).touch_up(x, y)
    }

    /// Tap the center of the first widget matching `selector`.
    ///
    /// Does nothing when nothing matches.
    pub fn tap(&mut self, selector: &str) -> &mut Self {
        if let Some(center) = self.query_bounds(selector).map(|b| b.center()) {
            self.tap_at(center.x, center.y);
        }
        self
    }

    /// Click with the left mouse button at a point.
    pub fn click_at(&mut self, x: f32, y: f32) -> &mut Self {
        let position = Point::new(x, y);
        self.dispatch(&Event::MouseDown {
            position,
            button: MouseButton::Left,
        });
        self.dispatch(&Event::MouseUp {
            position,
            button: MouseButton::Left,
        })
    }

    /// Drag a finger from `from` to `to` in `steps` evenly spaced moves,
    /// then lift it at `to`.
    pub fn drag(&mut self, from: Point, to: Point, steps: usize) -> &mut Self {
        self.touch_down(from.x, from.y);
        let steps = steps.max(1);
        for step in 1..=steps {
            let p = from.lerp(&to, step as f32 / steps as f32);
            self.touch_move(p.x, p.y);
        }
        self.touch_up(to.x, to.y)
    }

    // === Messages ===

    /// Messages of type `T` emitted so far, oldest first.
    pub fn messages<T: Any + Clone>(&self) -> Vec<T> {
        self.messages
            .iter()
            .filter_map(|m| m.downcast_ref::<T>())
            .cloned()
            .collect()
    }

    /// Number of messages emitted so far.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Forget collected messages.
    pub fn clear_messages(&mut self) -> &mut Self {
        self.messages.clear();
        self
    }

    // === Queries ===

    /// Query for a widget matching the selector.
    pub fn query(&self, selector: &str) -> Option<&dyn Widget> {
        let selector = Selector::parse(selector).ok()?;
        find_widget(&self.root, &selector)
    }

    /// Query for all widgets matching the selector, in tree order.
    pub fn query_all(&self, selector: &str) -> Vec<&dyn Widget> {
        let Ok(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        let mut results = Vec::new();
        find_all_widgets(&self.root, &selector, &mut results);
        results
    }

    /// Check if a widget exists.
    pub fn exists(&self, selector: &str) -> bool {
        self.query(selector).is_some()
    }

    /// Accessible name of the first match, or empty.
    pub fn text(&self, selector: &str) -> String {
        self.query(selector)
            .and_then(Widget::accessible_name)
            .unwrap_or_default()
            .to_string()
    }

    /// Bounds of the first match.
    ///
    /// Children of scroll views report bounds in content coordinates.
    pub fn query_bounds(&self, selector: &str) -> Option<Rect> {
        self.query(selector).map(Widget::bounds)
    }

    /// Run every brick assertion in the tree and collect the failures.
    pub fn verify_all(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        collect_violations(&self.root, &mut violations);
        violations
    }

    // === Assertions ===

    /// Assert that a widget exists.
    ///
    /// # Panics
    ///
    /// Panics if the widget does not exist.
    pub fn assert_exists(&self, selector: &str) -> &Self {
        assert!(
            self.exists(selector),
            "Expected widget matching '{selector}' to exist"
        );
        self
    }

    /// Assert that the accessible name matches exactly.
    ///
    /// # Panics
    ///
    /// Panics if the text does not match.
    pub fn assert_text(&self, selector: &str, expected: &str) -> &Self {
        let actual = self.text(selector);
        assert_eq!(
            actual, expected,
            "Expected text '{expected}' but got '{actual}' for '{selector}'"
        );
        self
    }

    /// Assert the count of matching widgets.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_count(&self, selector: &str, expected: usize) -> &Self {
        let actual = self.query_all(selector).len();
        assert_eq!(
            actual, expected,
            "Expected {expected} widgets matching '{selector}' but found {actual}"
        );
        self
    }

    /// Assert that every brick in the tree verifies.
    ///
    /// # Panics
    ///
    /// Panics listing every failed assertion.
    pub fn assert_verified(&self) -> &Self {
        let violations = self.verify_all();
        assert!(
            violations.is_empty(),
            "Brick verification failed:\n{}",
            violations
                .iter()
                .map(|v| format!("  {} {:?}: {}", v.brick, v.assertion, v.reason))
                .collect::<Vec<_>>()
                .join("\n")
        );
        self
    }
}

fn find_widget<'a>(widget: &'a dyn Widget, selector: &Selector) -> Option<&'a dyn Widget> {
    if selector.matches(widget) {
        return Some(widget);
    }
    let mut found = None;
    widget.visit_children(&mut |child| {
        if found.is_none() {
            found = find_widget(child, selector);
        }
    });
    found
}

fn find_all_widgets<'a>(
    widget: &'a dyn Widget,
    selector: &Selector,
    results: &mut Vec<&'a dyn Widget>,
) {
    if selector.matches(widget) {
        results.push(widget);
    }
    widget.visit_children(&mut |child| find_all_widgets(child, selector, results));
}

fn collect_violations(widget: &dyn Widget, violations: &mut Vec<Violation>) {
    let verification = widget.verify();
    violations.extend(
        verification
            .failed
            .into_iter()
            .map(|(assertion, reason)| Violation {
                brick: widget.brick_name(),
                test_id: widget.test_id().map(str::to_string),
                assertion,
                reason,
            }),
    );
    widget.visit_children(&mut |child| collect_violations(child, violations));
}

#[cfg(test)]
mod tests {
    use super::*;
    use flick_core::{
        widget::LayoutResult, AccessibleRole, Brick, BrickVerification, Canvas, TouchPhase,
        TypeId,
    };

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Pressed(u32);

    // Counts taps and animates for a fixed number of frames after each one
    struct MockWidget {
        test_id: Option<&'static str>,
        name: Option<&'static str>,
        children: Vec<MockWidget>,
        taps: u32,
        frames_left: u32,
        broken: bool,
        bounds: Rect,
    }

    impl MockWidget {
        fn new() -> Self {
            Self {
                test_id: None,
                name: None,
                children: Vec::new(),
                taps: 0,
                frames_left: 0,
                broken: false,
                bounds: Rect::default(),
            }
        }

        fn with_test_id(mut self, id: &'static str) -> Self {
            self.test_id = Some(id);
            self
        }

        fn with_name(mut self, name: &'static str) -> Self {
            self.name = Some(name);
            self
        }

        fn with_child(mut self, child: Self) -> Self {
            self.children.push(child);
            self
        }

        fn broken(mut self) -> Self {
            self.broken = true;
            self
        }
    }

    impl Brick for MockWidget {
        fn brick_name(&self) -> &'static str {
            "Mock"
        }
        fn assertions(&self) -> &[BrickAssertion] {
            &[BrickAssertion::Custom("not-broken")]
        }
        fn verify(&self) -> BrickVerification {
            BrickVerification::run(self.assertions(), |_| {
                if self.broken {
                    Err("broken on purpose".to_string())
                } else {
                    Ok(())
                }
            })
        }
    }

    impl Widget for MockWidget {
        fn type_id(&self) -> TypeId {
            TypeId::of::<Self>()
        }
        fn measure(&self, c: Constraints) -> Size {
            c.constrain(Size::new(100.0, 50.0))
        }
        fn layout(&mut self, b: Rect) -> LayoutResult {
            self.bounds = b;
            LayoutResult { size: b.size() }
        }
        fn paint(&self, canvas: &mut dyn Canvas) {
            canvas.fill_rect(self.bounds, flick_core::Color::BLACK);
        }
        fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
            let sample = event.pointer()?;
            if sample.phase != TouchPhase::Up {
                return None;
            }
            self.taps += 1;
            self.frames_left = 3;
            Some(Box::new(Pressed(self.taps)))
        }
        fn tick(&mut self, _dt: f64) -> bool {
            self.frames_left = self.frames_left.saturating_sub(1);
            self.frames_left > 0
        }
        fn visit_children<'a>(&'a self, visitor: &mut dyn FnMut(&'a dyn Widget)) {
            for child in &self.children {
                visitor(child);
            }
        }
        fn test_id(&self) -> Option<&str> {
            self.test_id
        }
        fn accessible_name(&self) -> Option<&str> {
            self.name
        }
        fn accessible_role(&self) -> AccessibleRole {
            AccessibleRole::Switch
        }
        fn bounds(&self) -> Rect {
            self.bounds
        }
    }

    #[test]
    fn test_harness_lays_out_root() {
        let harness = Harness::new(MockWidget::new());
        assert_eq!(harness.root_size(), Size::new(100.0, 50.0));

        let harness = harness.viewport(60.0, 20.0);
        assert_eq!(harness.root_size(), Size::new(60.0, 20.0));
    }

    #[test]
    fn test_harness_exists() {
        let harness = Harness::new(MockWidget::new().with_test_id("root"));
        assert!(harness.exists("[data-testid='root']"));
        assert!(harness.exists("#root"));
        assert!(!harness.exists("[data-testid='nonexistent']"));
        assert!(!harness.exists("not a selector!"));
    }

    #[test]
    #[should_panic(expected = "Expected widget matching")]
    fn test_harness_assert_exists_fails() {
        let harness = Harness::new(MockWidget::new());
        harness.assert_exists("[data-testid='missing']");
    }

    #[test]
    fn test_harness_text() {
        let harness = Harness::new(
            MockWidget::new()
                .with_test_id("greeting")
                .with_name("Hello World"),
        );
        harness.assert_text("#greeting", "Hello World");
        assert_eq!(harness.text("#missing"), "");
    }

    #[test]
    fn test_harness_query_all_nested() {
        let root = MockWidget::new().with_test_id("parent").with_child(
            MockWidget::new()
                .with_test_id("child")
                .with_child(MockWidget::new().with_test_id("child")),
        );
        let harness = Harness::new(root);
        harness.assert_count("#child", 2);
        harness.assert_count("Mock", 3);
        harness.assert_count("[role='switch']", 3);
    }

    #[test]
    fn test_harness_collects_messages() {
        let mut harness = Harness::new(MockWidget::new());
        harness.tap_at(10.0, 10.0).tap_at(20.0, 10.0);
        assert_eq!(harness.messages::<Pressed>(), vec![Pressed(1), Pressed(2)]);
        assert!(harness.messages::<String>().is_empty());
        harness.clear_messages();
        assert_eq!(harness.message_count(), 0);
    }

    #[test]
    fn test_harness_click_and_drag() {
        let mut harness = Harness::new(MockWidget::new());
        harness.click_at(5.0, 5.0);
        harness.drag(Point::new(0.0, 0.0), Point::new(50.0, 0.0), 5);
        assert_eq!(harness.widget().taps, 2);
    }

    #[test]
    fn test_harness_tap_selector() {
        let mut harness = Harness::new(MockWidget::new().with_test_id("btn"));
        harness.tap("#btn").tap("#missing");
        assert_eq!(harness.widget().taps, 1);
    }

    #[test]
    fn test_harness_settle() {
        let mut harness = Harness::new(MockWidget::new());
        assert_eq!(harness.settle(), 1);
        harness.tap_at(1.0, 1.0);
        assert_eq!(harness.settle(), 3);
        assert!(!harness.advance(FRAME_SECS));
    }

    #[test]
    fn test_harness_paint() {
        let harness = Harness::new(MockWidget::new());
        let canvas = harness.paint();
        assert_eq!(
            canvas.commands()[0].rect_bounds(),
            Some(Rect::new(0.0, 0.0, 100.0, 50.0))
        );
    }

    #[test]
    fn test_harness_verify_all_finds_nested_failure() {
        let root = MockWidget::new().with_child(MockWidget::new().with_test_id("bad").broken());
        let harness = Harness::new(root);
        let violations = harness.verify_all();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].test_id.as_deref(), Some("bad"));
        assert_eq!(violations[0].reason, "broken on purpose");
    }

    #[test]
    #[should_panic(expected = "Brick verification failed")]
    fn test_harness_assert_verified_panics() {
        Harness::new(MockWidget::new().broken()).assert_verified();
    }
}
