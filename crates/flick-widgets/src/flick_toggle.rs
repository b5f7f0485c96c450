//! Flick toggle: an on/off switch that is tapped or dragged.
//!
//! The toggle is a horizontal scroll view over a row of three labels: the on
//! label, a thumb and the off label. The viewport shows one label and the
//! thumb. Scrolled fully left the on label is visible; scrolled by one label
//! width the off label is.
//!
//! A contact that ends within one pixel of where it started on both axes is
//! a tap and inverts the state. Any other contact is a flick: the content
//! follows the finger and on release the state is decided by how far it was
//! scrolled. From on, scrolling more than a fifth of the way turns it off;
//! from off, scrolling back more than a fifth of the way turns it on.
//! Otherwise the content snaps back.

use crate::geometry::FlickGeometry;
use crate::label::Label;
use crate::row::Row;
use crate::scroll_view::HorizontalScrollView;
use flick_core::{
    gesture::DEFAULT_TAP_SLOP, widget::LayoutResult, AccessibleRole, Brick, BrickAssertion,
    BrickVerification, Canvas, Color, Constraints, DisplayMetrics, Event, GestureKind, Insets,
    Point, Rect, Size, TextMetrics, TextUnit, TouchPhase, TouchSession, TypeId, Widget,
    WidgetId,
};
use flick_yaml::FlickAttributes;
use log::{debug, trace};
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Fraction of the scroll range a flick has to cross to change state.
pub const FLICK_RATIO: f32 = 0.2;

/// Space around the viewport in pixels.
pub const PADDING: f32 = 5.0;

/// Text size of new toggles in scaled pixels.
pub const DEFAULT_TEXT_SIZE_SP: f32 = 16.0;

const LABEL_PADDING: Insets = Insets::symmetric(8.0, 4.0);
const ON: usize = 0;
const THUMB: usize = 1;
const OFF: usize = 2;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Message emitted from [`Widget::event`] when a gesture changes the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlickChanged {
    /// The new state
    pub on: bool,
}

/// Receives state changes of a flick toggle.
///
/// Called synchronously, only when the value actually changes. Any
/// `FnMut(WidgetId, bool)` closure is an observer.
pub trait FlickObserver: Send + Sync {
    /// The toggle `id` is now `on`.
    fn flick_changed(&mut self, id: WidgetId, on: bool);
}

impl<F> FlickObserver for F
where
    F: FnMut(WidgetId, bool) + Send + Sync,
{
    fn flick_changed(&mut self, id: WidgetId, on: bool) {
        self(id, on);
    }
}

/// Decide the state after a flick released at `offset`.
///
/// Reaching exactly a fifth of the range is not enough to change state.
#[must_use]
pub fn resolve_flick(was_on: bool, offset: f32, max_scroll: f32) -> bool {
    let threshold = max_scroll * FLICK_RATIO;
    if was_on {
        offset <= threshold
    } else {
        offset < max_scroll - threshold
    }
}

/// On/off switch operated by tapping or flicking.
pub struct FlickToggle {
    id: WidgetId,
    on: bool,
    interactive: bool,
    metrics: DisplayMetrics,
    text_size: f32,
    padding: Insets,
    scroll: HorizontalScrollView<Row<Label>>,
    geometry: FlickGeometry,
    session: Option<TouchSession>,
    observer: Option<Box<dyn FlickObserver>>,
    test_id_value: Option<String>,
    bounds: Rect,
}

impl Default for FlickToggle {
    fn default() -> Self {
        Self::new()
    }
}

impl FlickToggle {
    /// Create a toggle for a baseline display: on, labelled "On"/"Off".
    #[must_use]
    pub fn new() -> Self {
        Self::with_metrics(DisplayMetrics::default())
    }

    /// Create a toggle for a display with the given metrics.
    #[must_use]
    pub fn with_metrics(metrics: DisplayMetrics) -> Self {
        let text_size = TextUnit::Sp.to_px(DEFAULT_TEXT_SIZE_SP, &metrics);
        let label = |text: &str, background: Color, test_id: &str| {
            Label::new(text)
                .font_size(text_size)
                .padding(LABEL_PADDING)
                .text_color(Color::WHITE)
                .background(background)
                .with_test_id(test_id)
        };

        let row = Row::new()
            .child(label("On", Color::rgb8(0x4c, 0xaf, 0x50), "flick-on"))
            .child(label("", Color::rgb8(0xee, 0xee, 0xee), "flick-thumb").hide_text())
            .child(label("Off", Color::rgb8(0x9e, 0x9e, 0x9e), "flick-off"));

        let mut toggle = Self {
            id: WidgetId::new(NEXT_ID.fetch_add(1, Ordering::Relaxed)),
            on: true,
            interactive: true,
            metrics,
            text_size,
            padding: Insets::uniform(PADDING),
            scroll: HorizontalScrollView::new(row).with_test_id("flick-scroll"),
            geometry: FlickGeometry::unmeasured(&metrics),
            session: None,
            observer: None,
            test_id_value: None,
            bounds: Rect::default(),
        };
        toggle.apply_geometry();
        toggle.refresh_scroll(false);
        debug!("FlickToggle {} created, density {}", toggle.id, metrics.density);
        toggle
    }

    /// Create a toggle styled by an attribute set.
    #[must_use]
    pub fn from_attributes(attributes: &FlickAttributes, metrics: DisplayMetrics) -> Self {
        let mut toggle = Self::with_metrics(metrics);
        toggle.apply_attributes(attributes);
        toggle
    }

    /// Apply every attribute that is set, leaving the rest untouched.
    pub fn apply_attributes(&mut self, attributes: &FlickAttributes) {
        if let Some(text) = &attributes.text_on {
            self.set_label_on(text.clone());
        }
        if let Some(text) = &attributes.text_off {
            self.set_label_off(text.clone());
        }
        if let Some(size) = attributes.text_size {
            self.set_text_size_with_unit(attributes.text_unit, size);
        }
        if let Some(color) = attributes.on_background {
            self.label_mut(ON).set_background(color);
        }
        if let Some(color) = attributes.off_background {
            self.label_mut(OFF).set_background(color);
        }
        if let Some(color) = attributes.thumb_background {
            self.label_mut(THUMB).set_background(color);
        }
        if let Some(color) = attributes.on_text_color {
            self.label_mut(ON).set_text_color(color);
        }
        if let Some(color) = attributes.off_text_color {
            self.label_mut(OFF).set_text_color(color);
        }
        if let Some(id) = &attributes.test_id {
            self.test_id_value = Some(id.clone());
        }
        if let Some(enabled) = attributes.enabled {
            self.set_interactive(enabled);
        }
        if let Some(checked) = attributes.checked {
            self.set_toggled(checked);
        }
    }

    /// Set the observer notified of state changes.
    #[must_use]
    pub fn on_change(mut self, observer: impl FlickObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Replace the text measurement backend of all labels.
    #[must_use]
    pub fn with_text_metrics(mut self, metrics: Arc<dyn TextMetrics>) -> Self {
        for label in self.scroll.content_mut().children_mut() {
            label.set_metrics(Arc::clone(&metrics));
        }
        self.resync();
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Register `observer`, replacing any previous one. `None` unregisters.
    pub fn set_change_observer(&mut self, observer: Option<Box<dyn FlickObserver>>) {
        self.observer = observer;
    }

    /// Set the text shown while on.
    pub fn set_label_on(&mut self, text: impl Into<String>) {
        self.label_mut(ON).set_content(text);
        self.resync();
    }

    /// Set the text shown while off.
    pub fn set_label_off(&mut self, text: impl Into<String>) {
        self.label_mut(OFF).set_content(text);
        self.resync();
    }

    /// Set the text size of both labels in scaled pixels.
    pub fn set_text_size(&mut self, size: f32) {
        self.set_text_size_with_unit(TextUnit::Sp, size);
    }

    /// Set the text size of both labels in the given unit.
    ///
    /// The thumb gets the same size so its height matches the labels.
    pub fn set_text_size_with_unit(&mut self, unit: TextUnit, size: f32) {
        let px = unit.to_px(size, &self.metrics);
        for label in self.scroll.content_mut().children_mut() {
            label.set_font_size(px);
        }
        self.text_size = self.label(ON).get_font_size();
        self.resync();
    }

    /// Set the state without animation.
    pub fn set_toggled(&mut self, on: bool) {
        self.set_toggled_animated(on, false);
    }

    /// Set the state, scrolling smoothly to it when `animated`.
    ///
    /// The observer hears about actual changes only; the offset is re-synced
    /// either way.
    pub fn set_toggled_animated(&mut self, on: bool, animated: bool) {
        if self.on != on {
            debug!("FlickToggle {} set to {}", self.id, if on { "on" } else { "off" });
            self.on = on;
            if let Some(observer) = self.observer.as_mut() {
                observer.flick_changed(self.id, on);
            }
        }
        self.refresh_scroll(animated);
    }

    /// Invert the state without animation.
    pub fn toggle(&mut self) {
        self.set_toggled(!self.on);
    }

    /// Enable or freeze touch handling.
    ///
    /// A frozen toggle swallows touch input and draws its labels dimmed. A
    /// gesture in progress is dropped and the offset snaps to the state.
    pub fn set_interactive(&mut self, interactive: bool) {
        debug!("FlickToggle {} interactive: {}", self.id, interactive);
        self.interactive = interactive;
        self.scroll.set_enabled(interactive);
        for label in self.scroll.content_mut().children_mut() {
            label.set_enabled(interactive);
        }
        if !interactive && self.session.take().is_some() {
            self.refresh_scroll(false);
        }
    }

    /// Text of the label for the current state.
    #[must_use]
    pub fn displayed_text(&self) -> &str {
        if self.on {
            self.label_on()
        } else {
            self.label_off()
        }
    }

    /// Current state.
    #[must_use]
    pub const fn is_toggled(&self) -> bool {
        self.on
    }

    /// Whether touch input is handled.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Text shown while on.
    #[must_use]
    pub fn label_on(&self) -> &str {
        self.label(ON).content()
    }

    /// Text shown while off.
    #[must_use]
    pub fn label_off(&self) -> &str {
        self.label(OFF).content()
    }

    /// Text size in pixels.
    #[must_use]
    pub const fn text_size(&self) -> f32 {
        self.text_size
    }

    /// Current geometry.
    #[must_use]
    pub const fn geometry(&self) -> &FlickGeometry {
        &self.geometry
    }

    /// Current scroll offset, 0 when showing on.
    #[must_use]
    pub const fn scroll_offset(&self) -> f32 {
        self.scroll.scroll_offset()
    }

    /// Whether a smooth scroll is running.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.scroll.is_animating()
    }

    /// Process-unique instance ID.
    #[must_use]
    pub const fn id(&self) -> WidgetId {
        self.id
    }

    /// Display metrics the toggle was created for.
    #[must_use]
    pub const fn metrics(&self) -> &DisplayMetrics {
        &self.metrics
    }

    /// The three labels: on, thumb, off.
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        self.scroll.content().children()
    }

    fn label(&self, index: usize) -> &Label {
        &self.scroll.content().children()[index]
    }

    fn label_mut(&mut self, index: usize) -> &mut Label {
        &mut self.scroll.content_mut().children_mut()[index]
    }

    fn compute_geometry(&self) -> FlickGeometry {
        FlickGeometry::compute(
            self.label(ON).natural_size(),
            self.label(OFF).natural_size(),
            &self.metrics,
        )
    }

    fn apply_geometry(&mut self) {
        let geometry = self.compute_geometry();
        if geometry != self.geometry {
            debug!(
                "FlickToggle {} geometry: label {}x{}, thumb {}x{}, viewport {}x{}",
                self.id,
                geometry.label.width,
                geometry.label.height,
                geometry.thumb.width,
                geometry.thumb.height,
                geometry.viewport.width,
                geometry.viewport.height,
            );
        }
        self.geometry = geometry;

        self.label_mut(ON).set_fixed_size(Some(geometry.label));
        self.label_mut(THUMB).set_fixed_size(Some(geometry.thumb));
        self.label_mut(OFF).set_fixed_size(Some(geometry.label));
        self.scroll.set_viewport_width(Some(geometry.viewport.width));
    }

    /// Recompute geometry after a size-affecting change and move to the
    /// state's offset unless a finger is on the content.
    fn resync(&mut self) {
        self.apply_geometry();
        if self.session.is_none() {
            let animating = self.scroll.is_animating();
            self.refresh_scroll(animating);
        }
    }

    fn refresh_scroll(&mut self, smooth: bool) {
        let target = self.geometry.offset_for(self.on);
        trace!(
            "FlickToggle {} scroll to {} ({})",
            self.id,
            target,
            if smooth { "smooth" } else { "snap" }
        );
        if smooth {
            self.scroll.smooth_scroll_to(target);
        } else {
            self.scroll.scroll_to(target);
        }
    }

    fn finish_gesture(&mut self, session: TouchSession, end: Option<Point>) -> bool {
        self.scroll.cancel_drag();
        let was_on = self.on;
        let kind = session.finish(end, DEFAULT_TAP_SLOP);
        let on = match kind {
            GestureKind::Tap => !was_on,
            GestureKind::Drag => {
                resolve_flick(was_on, self.scroll.scroll_offset(), self.geometry.max_scroll)
            }
        };
        debug!(
            "FlickToggle {} {:?} at offset {} of {}: {} -> {}",
            self.id,
            kind,
            self.scroll.scroll_offset(),
            self.geometry.max_scroll,
            was_on,
            on
        );
        self.set_toggled_animated(on, true);
        self.on != was_on
    }
}

impl fmt::Debug for FlickToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlickToggle")
            .field("id", &self.id)
            .field("on", &self.on)
            .field("interactive", &self.interactive)
            .field("label_on", &self.label_on())
            .field("label_off", &self.label_off())
            .field("geometry", &self.geometry)
            .field("scroll_offset", &self.scroll.scroll_offset())
            .finish_non_exhaustive()
    }
}

impl Widget for FlickToggle {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(self.compute_geometry().viewport.expand(self.padding))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        self.apply_geometry();
        let viewport = self.geometry.viewport;
        self.scroll.layout(Rect::new(
            bounds.x + self.padding.left,
            bounds.y + self.padding.top,
            viewport.width,
            viewport.height,
        ));
        self.refresh_scroll(false);
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        self.scroll.paint(canvas);
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        let sample = event.pointer()?;
        if !self.interactive {
            return None;
        }

        match sample.phase {
            TouchPhase::Down => {
                let position = sample.position?;
                if self.session.is_some() || !self.bounds.contains_point(&position) {
                    return None;
                }
                trace!("FlickToggle {} down at {:?}", self.id, position);
                self.session = Some(TouchSession::begin(sample.pointer, position));
                self.scroll.event(event);
                None
            }
            TouchPhase::Move => {
                let session = self
                    .session
                    .as_mut()
                    .filter(|s| s.pointer() == sample.pointer)?;
                if let Some(position) = sample.position {
                    session.track(position);
                }
                self.scroll.event(event);
                None
            }
            TouchPhase::Up | TouchPhase::Cancel => {
                let session = self.session.filter(|s| s.pointer() == sample.pointer)?;
                self.session = None;
                self.finish_gesture(session, sample.position)
                    .then(|| Box::new(FlickChanged { on: self.on }) as Box<dyn Any + Send>)
            }
        }
    }

    fn tick(&mut self, dt: f64) -> bool {
        self.scroll.tick(dt)
    }

    fn visit_children<'a>(&'a self, visitor: &mut dyn FnMut(&'a dyn Widget)) {
        visitor(&self.scroll);
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(self.displayed_text()).filter(|text| !text.is_empty())
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Switch
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for FlickToggle {
    fn brick_name(&self) -> &'static str {
        "FlickToggle"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &[
            BrickAssertion::Custom("offset-matches-state"),
            BrickAssertion::Custom("labels-share-size"),
        ]
    }

    fn verify(&self) -> BrickVerification {
        BrickVerification::run(self.assertions(), |assertion| match assertion {
            BrickAssertion::Custom("offset-matches-state") => {
                // A finger on the content owns the offset
                if self.session.is_some() {
                    return Ok(());
                }
                let expected = self.geometry.offset_for(self.on);
                let target = self.scroll.scroll_target();
                if target == expected {
                    Ok(())
                } else {
                    Err(format!(
                        "{} is {} but scrolls to {target}, expected {expected}",
                        self.id,
                        if self.on { "on" } else { "off" }
                    ))
                }
            }
            BrickAssertion::Custom("labels-share-size") => {
                let (on, off) = (self.label(ON).fixed_size(), self.label(OFF).fixed_size());
                if on == off {
                    Ok(())
                } else {
                    Err(format!("on label {on:?} differs from off label {off:?}"))
                }
            }
            _ => Ok(()),
        })
    }
}
