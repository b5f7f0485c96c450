//! Row widget for horizontal layout.

use flick_core::{
    widget::LayoutResult, AccessibleRole, Brick, BrickAssertion, BrickVerification, Canvas,
    Constraints, Event, Rect, Size, TypeId, Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Vertical alignment options for row children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CrossAxisAlignment {
    /// Align to the start (top)
    Start,
    /// Align to the end (bottom)
    End,
    /// Center vertically
    #[default]
    Center,
    /// Stretch to fill
    Stretch,
}

/// Row of children laid out left to right at their measured widths.
///
/// Children are kept by value so owners can reach them with their concrete
/// type through [`Row::children_mut`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row<W> {
    /// Cross axis (vertical) alignment
    cross_axis_alignment: CrossAxisAlignment,
    /// Gap between children
    gap: f32,
    /// Children widgets
    children: Vec<W>,
    /// Test ID
    test_id_value: Option<String>,
    /// Cached bounds
    #[serde(skip)]
    bounds: Rect,
}

impl<W> Default for Row<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Row<W> {
    /// Create a new empty row.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cross_axis_alignment: CrossAxisAlignment::Center,
            gap: 0.0,
            children: Vec::new(),
            test_id_value: None,
            bounds: Rect::new(0.0, 0.0, 0.0, 0.0),
        }
    }

    /// Set cross axis alignment.
    #[must_use]
    pub const fn cross_axis_alignment(mut self, alignment: CrossAxisAlignment) -> Self {
        self.cross_axis_alignment = alignment;
        self
    }

    /// Set gap between children.
    #[must_use]
    pub const fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Add a child widget.
    #[must_use]
    pub fn child(mut self, widget: W) -> Self {
        self.children.push(widget);
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Children in left-to-right order.
    #[must_use]
    pub fn children(&self) -> &[W] {
        &self.children
    }

    /// Mutable children in left-to-right order.
    pub fn children_mut(&mut self) -> &mut [W] {
        &mut self.children
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the row has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn total_gap(&self) -> f32 {
        self.gap * self.children.len().saturating_sub(1) as f32
    }
}

impl<W: Widget + 'static> Widget for Row<W> {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        if self.children.is_empty() {
            return constraints.constrain(Size::ZERO);
        }

        // Children take their own width; a row never squeezes them
        let child_constraints = Constraints::free_width(constraints.max_height);
        let (width, height) = self
            .children
            .iter()
            .map(|child| child.measure(child_constraints))
            .fold((0.0f32, 0.0f32), |(w, h), size| {
                (w + size.width, h.max(size.height))
            });

        constraints.constrain(Size::new(width + self.total_gap(), height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        let child_constraints = Constraints::free_width(bounds.height);

        let mut x = bounds.x;
        for child in &mut self.children {
            let size = child.measure(child_constraints);
            let (y, height) = match self.cross_axis_alignment {
                CrossAxisAlignment::Start => (bounds.y, size.height),
                CrossAxisAlignment::End => (bounds.y + bounds.height - size.height, size.height),
                CrossAxisAlignment::Center => {
                    (bounds.y + (bounds.height - size.height) / 2.0, size.height)
                }
                CrossAxisAlignment::Stretch => (bounds.y, bounds.height),
            };
            child.layout(Rect::new(x, y, size.width, height));
            x += size.width + self.gap;
        }

        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        for child in &self.children {
            child.paint(canvas);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        for child in &mut self.children {
            if let Some(msg) = child.event(event) {
                return Some(msg);
            }
        }
        None
    }

    fn visit_children<'a>(&'a self, visitor: &mut dyn FnMut(&'a dyn Widget)) {
        for child in &self.children {
            visitor(child);
        }
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Group
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl<W: Widget> Brick for Row<W> {
    fn brick_name(&self) -> &'static str {
        "Row"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &[BrickAssertion::MaxLatencyMs(16)]
    }

    fn verify(&self) -> BrickVerification {
        BrickVerification::run(self.assertions(), |_| Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Label;

    fn fixed(width: f32, height: f32) -> Label {
        let mut label = Label::new("");
        label.set_fixed_size(Some(Size::new(width, height)));
        label
    }

    #[test]
    fn test_row_empty() {
        let row: Row<Label> = Row::new();
        let size = row.measure(Constraints::loose(Size::new(100.0, 100.0)));
        assert_eq!(size, Size::ZERO);
        assert!(row.is_empty());
    }

    #[test]
    fn test_row_builder() {
        let row: Row<Label> = Row::new()
            .gap(10.0)
            .cross_axis_alignment(CrossAxisAlignment::Start)
            .with_test_id("my-row");

        assert_eq!(row.gap, 10.0);
        assert_eq!(row.cross_axis_alignment, CrossAxisAlignment::Start);
        assert_eq!(Widget::test_id(&row), Some("my-row"));
    }

    #[test]
    fn test_row_default() {
        let row: Row<Label> = Row::default();
        assert_eq!(row.cross_axis_alignment, CrossAxisAlignment::Center);
        assert_eq!(row.gap, 0.0);
    }

    #[test]
    fn test_row_measure_sums_widths() {
        let row = Row::new()
            .gap(4.0)
            .child(fixed(98.0, 50.0))
            .child(fixed(68.0, 50.0))
            .child(fixed(98.0, 40.0));
        let size = row.measure(Constraints::unbounded());
        assert_eq!(size, Size::new(272.0, 50.0));
    }

    #[test]
    fn test_row_does_not_squeeze_children() {
        let row = Row::new().child(fixed(98.0, 50.0)).child(fixed(98.0, 50.0));
        let size = row.measure(Constraints::unbounded());
        assert_eq!(size.width, 196.0);

        let mut row = row;
        row.layout(Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(row.children()[1].bounds(), Rect::new(98.0, 0.0, 98.0, 50.0));
    }

    #[test]
    fn test_row_layout_positions_children() {
        let mut row = Row::new()
            .child(fixed(30.0, 10.0))
            .child(fixed(20.0, 20.0));
        row.layout(Rect::new(5.0, 0.0, 100.0, 20.0));

        assert_eq!(row.children()[0].bounds(), Rect::new(5.0, 5.0, 30.0, 10.0));
        assert_eq!(row.children()[1].bounds(), Rect::new(35.0, 0.0, 20.0, 20.0));
    }

    #[test]
    fn test_row_cross_axis_stretch_and_end() {
        let mut row = Row::new()
            .cross_axis_alignment(CrossAxisAlignment::Stretch)
            .child(fixed(10.0, 10.0));
        row.layout(Rect::new(0.0, 0.0, 10.0, 40.0));
        assert_eq!(row.children()[0].bounds().height, 40.0);

        let mut row = Row::new()
            .cross_axis_alignment(CrossAxisAlignment::End)
            .child(fixed(10.0, 10.0));
        row.layout(Rect::new(0.0, 0.0, 10.0, 40.0));
        assert_eq!(row.children()[0].bounds().y, 30.0);
    }

    #[test]
    fn test_row_visit_children_in_order() {
        let row = Row::new()
            .child(Label::new("a").with_test_id("a"))
            .child(Label::new("b").with_test_id("b"));
        let mut ids = Vec::new();
        row.visit_children(&mut |child| ids.push(child.test_id()));
        assert_eq!(ids, vec![Some("a"), Some("b")]);
    }

    #[test]
    fn test_row_children_mut() {
        let mut row = Row::new().child(Label::new("a"));
        row.children_mut()[0].set_content("z");
        assert_eq!(row.children()[0].content(), "z");
        assert_eq!(row.len(), 1);
    }
}
