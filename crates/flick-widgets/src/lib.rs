//! Widgets for the Flick toggle.
//!
//! [`Label`], [`Row`] and [`HorizontalScrollView`] are the host primitives
//! the [`FlickToggle`] is composed from.

pub mod flick_toggle;
pub mod geometry;
pub mod label;
pub mod row;
pub mod scroll_view;

pub use flick_toggle::{resolve_flick, FlickChanged, FlickObserver, FlickToggle};
pub use geometry::FlickGeometry;
pub use label::Label;
pub use row::{CrossAxisAlignment, Row};
pub use scroll_view::{HorizontalScrollView, Scrolled};
