//! Core types and traits for the Flick toggle widget.
//!
//! This crate provides the host-toolkit seam the widgets are built on:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`Insets`]
//! - Layout constraints: [`Constraints`]
//! - Input: [`Event`] and its reduction to [`PointerSample`]s, single-contact
//!   [`TouchSession`]s and tap/drag classification
//! - The [`Widget`] and [`Brick`] traits, the [`Canvas`] paint target and a
//!   [`RecordingCanvas`] for tests
//! - Display density, dimension units and [`TextMetrics`]
//! - Eased animations for smooth scrolling

pub mod animation;
pub mod brick;
mod canvas;
mod color;
mod constraints;
pub mod draw;
mod event;
pub mod gesture;
mod geometry;
mod metrics;
pub mod widget;

pub use animation::{EasedValue, Easing};
pub use brick::{Brick, BrickAssertion, BrickBudget, BrickVerification};
pub use canvas::RecordingCanvas;
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use draw::{DrawCommand, Transform2D};
pub use event::{Event, MouseButton, PointerId, PointerSample, TouchId, TouchPhase};
pub use geometry::{Insets, Point, Rect, Size};
pub use gesture::{GestureKind, TouchSession};
pub use metrics::{DisplayMetrics, EstimatedTextMetrics, TextMetrics, TextUnit};
pub use widget::{
    AccessibleRole, Canvas, FontWeight, LayoutResult, TextStyle, TypeId, Widget, WidgetId,
};
