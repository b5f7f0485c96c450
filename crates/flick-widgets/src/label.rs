//! Label widget: a single line of centered text on a solid background.

use flick_core::{
    widget::LayoutResult, AccessibleRole, Brick, BrickAssertion, BrickVerification, Canvas,
    Color, Constraints, EstimatedTextMetrics, Event, FontWeight, Insets, Point, Rect, Size,
    TextMetrics, TextStyle, TypeId, Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;

/// Alpha applied to background and text while a label is disabled.
const DISABLED_ALPHA: f32 = 0.5;

/// Slack allowed when checking that text fits the laid-out bounds.
const FIT_EPSILON: f32 = 0.01;

fn default_text_metrics() -> Arc<dyn TextMetrics> {
    Arc::new(EstimatedTextMetrics::default())
}

/// Text label with background, padding and an optional fixed size.
///
/// Without a fixed size the label wraps its content: the text measured by
/// its [`TextMetrics`] plus padding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    /// Text content
    content: String,
    /// Text color
    text_color: Color,
    /// Background fill
    background: Color,
    /// Font size in pixels
    font_size: f32,
    /// Font weight
    font_weight: FontWeight,
    /// Space between background edge and text
    padding: Insets,
    /// Whether the label is drawn as enabled
    enabled: bool,
    /// Whether the text is drawn at all (it is still measured)
    text_visible: bool,
    /// Size overriding wrap-content
    fixed_size: Option<Size>,
    /// Test ID
    test_id_value: Option<String>,
    /// Text measurement backend
    #[serde(skip, default = "default_text_metrics")]
    metrics: Arc<dyn TextMetrics>,
    /// Cached bounds
    #[serde(skip)]
    bounds: Rect,
}

impl Label {
    /// Create a new label.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            text_color: Color::BLACK,
            background: Color::TRANSPARENT,
            font_size: 16.0,
            font_weight: FontWeight::Normal,
            padding: Insets::ZERO,
            enabled: true,
            text_visible: true,
            fixed_size: None,
            test_id_value: None,
            metrics: default_text_metrics(),
            bounds: Rect::default(),
        }
    }

    /// Set text color.
    #[must_use]
    pub const fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Set background color.
    #[must_use]
    pub const fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Set font size in pixels.
    #[must_use]
    pub fn font_size(mut self, size: f32) -> Self {
        self.set_font_size(size);
        self
    }

    /// Set font weight.
    #[must_use]
    pub const fn font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    /// Set padding.
    #[must_use]
    pub const fn padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Measure the text but never draw it.
    #[must_use]
    pub const fn hide_text(mut self) -> Self {
        self.text_visible = false;
        self
    }

    /// Set the text measurement backend.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn TextMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Get the text content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the text content.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Get font size in pixels.
    #[must_use]
    pub const fn get_font_size(&self) -> f32 {
        self.font_size
    }

    /// Set font size in pixels. Negative or non-finite sizes become zero.
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = if size.is_finite() { size.max(0.0) } else { 0.0 };
    }

    /// Replace the text measurement backend.
    pub fn set_metrics(&mut self, metrics: Arc<dyn TextMetrics>) {
        self.metrics = metrics;
    }

    /// Get background color.
    #[must_use]
    pub const fn get_background(&self) -> Color {
        self.background
    }

    /// Set background color.
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Set text color.
    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    /// Whether the label is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the label.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Size overriding wrap-content, if any.
    #[must_use]
    pub const fn fixed_size(&self) -> Option<Size> {
        self.fixed_size
    }

    /// Override (or with `None`, restore) wrap-content sizing.
    pub fn set_fixed_size(&mut self, size: Option<Size>) {
        self.fixed_size = size;
    }

    /// Content-fitting size: measured text plus padding.
    #[must_use]
    pub fn natural_size(&self) -> Size {
        self.text_size().expand(self.padding)
    }

    fn text_size(&self) -> Size {
        self.metrics.measure(&self.content, self.font_size)
    }

    fn dimmed(&self, color: Color) -> Color {
        if self.enabled {
            color
        } else {
            color.with_alpha(color.a * DISABLED_ALPHA)
        }
    }
}

impl Widget for Label {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(self.fixed_size.unwrap_or_else(|| self.natural_size()))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if self.background.a > 0.0 {
            canvas.fill_rect(self.bounds, self.dimmed(self.background));
        }

        if !self.text_visible || self.content.is_empty() {
            return;
        }

        // Gravity center
        let text = self.text_size();
        let position = Point::new(
            self.bounds.x + (self.bounds.width - text.width) / 2.0,
            self.bounds.y + (self.bounds.height - text.height) / 2.0,
        );
        let style = TextStyle {
            size: self.font_size,
            color: self.dimmed(self.text_color),
            weight: self.font_weight,
        };
        canvas.draw_text(&self.content, position, &style);
    }

    fn event(&mut self, _event: &Event) -> Option<Box<dyn Any + Send>> {
        None
    }

    fn accessible_name(&self) -> Option<&str> {
        (self.text_visible && !self.content.is_empty()).then_some(self.content.as_str())
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Text
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for Label {
    fn brick_name(&self) -> &'static str {
        "Label"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &[BrickAssertion::Custom("text-fits-bounds")]
    }

    fn verify(&self) -> BrickVerification {
        BrickVerification::run(self.assertions(), |_| {
            // Not laid out yet: nothing on screen to clip.
            if self.bounds.is_empty() {
                return Ok(());
            }
            let needed = self.natural_size();
            let fits = self.bounds.width + FIT_EPSILON >= needed.width
                && self.bounds.height + FIT_EPSILON >= needed.height;
            if fits {
                Ok(())
            } else {
                Err(format!(
                    "'{}' needs {}x{} but has {}x{}",
                    self.content, needed.width, needed.height, self.bounds.width, self.bounds.height
                ))
            }
        })
    }
}
