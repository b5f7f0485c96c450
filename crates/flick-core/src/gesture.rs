//! Single-contact gesture tracking.
//!
//! A [`TouchSession`] lives from the down event of one contact to its up or
//! cancel event. At the end the contact is classified as a [`GestureKind::Tap`]
//! when it finished close to where it started, otherwise as a
//! [`GestureKind::Drag`]. The path in between does not matter.

use crate::event::PointerId;
use crate::geometry::Point;

/// Default per-axis distance below which a contact still counts as a tap.
pub const DEFAULT_TAP_SLOP: f32 = 1.0;

/// How a finished contact is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Ended within the tap slop of the down point
    Tap,
    /// Ended anywhere else
    Drag,
}

/// Classify a contact from its down and end points.
///
/// Both axis deltas must be strictly below `slop` for a tap.
#[must_use]
pub fn classify(down: Point, end: Point, slop: f32) -> GestureKind {
    let delta = end - down;
    if delta.x.abs() < slop && delta.y.abs() < slop {
        GestureKind::Tap
    } else {
        GestureKind::Drag
    }
}

/// Record of one contact between down and up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSession {
    pointer: PointerId,
    down: Point,
    last: Point,
}

impl TouchSession {
    /// Start tracking a contact.
    #[must_use]
    pub const fn begin(pointer: PointerId, down: Point) -> Self {
        Self {
            pointer,
            down,
            last: down,
        }
    }

    /// Update the last seen position.
    pub fn track(&mut self, position: Point) {
        self.last = position;
    }

    /// The contact being tracked.
    #[must_use]
    pub const fn pointer(&self) -> PointerId {
        self.pointer
    }

    /// Where the contact started.
    #[must_use]
    pub const fn down_position(&self) -> Point {
        self.down
    }

    /// Most recent known position.
    #[must_use]
    pub const fn last_position(&self) -> Point {
        self.last
    }

    /// Classify the contact as ending at `end`, or at the last seen point when
    /// the end carries no position.
    #[must_use]
    pub fn finish(&self, end: Option<Point>, slop: f32) -> GestureKind {
        classify(self.down, end.unwrap_or(self.last), slop)
    }
}
