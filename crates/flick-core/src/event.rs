//! Input events for widgets.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Input event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Mouse moved to position
    MouseMove {
        /// New position
        position: Point,
    },
    /// Mouse button pressed
    MouseDown {
        /// Position of click
        position: Point,
        /// Button pressed
        button: MouseButton,
    },
    /// Mouse button released
    MouseUp {
        /// Position of release
        position: Point,
        /// Button released
        button: MouseButton,
    },
    /// Touch started
    TouchStart {
        /// Touch identifier
        id: TouchId,
        /// Touch position
        position: Point,
        /// Touch pressure (0.0 to 1.0)
        pressure: f32,
    },
    /// Touch moved
    TouchMove {
        /// Touch identifier
        id: TouchId,
        /// New position
        position: Point,
        /// Touch pressure
        pressure: f32,
    },
    /// Touch ended
    TouchEnd {
        /// Touch identifier
        id: TouchId,
        /// Final position
        position: Point,
    },
    /// Touch cancelled (e.g., palm rejection or parent took over)
    TouchCancel {
        /// Touch identifier
        id: TouchId,
    },
    /// Window resized
    Resize {
        /// New width
        width: f32,
        /// New height
        height: f32,
    },
}

impl Event {
    /// Create a touch start with full pressure.
    #[must_use]
    pub const fn touch_start(id: u32, position: Point) -> Self {
        Self::TouchStart {
            id: TouchId(id),
            position,
            pressure: 1.0,
        }
    }

    /// Create a touch move with full pressure.
    #[must_use]
    pub const fn touch_move(id: u32, position: Point) -> Self {
        Self::TouchMove {
            id: TouchId(id),
            position,
            pressure: 1.0,
        }
    }

    /// Create a touch end.
    #[must_use]
    pub const fn touch_end(id: u32, position: Point) -> Self {
        Self::TouchEnd {
            id: TouchId(id),
            position,
        }
    }

    /// Create a touch cancel.
    #[must_use]
    pub const fn touch_cancel(id: u32) -> Self {
        Self::TouchCancel { id: TouchId(id) }
    }

    /// Reduce touch and primary-button mouse events to a single pointer stream.
    ///
    /// Returns `None` for events that carry no pointer contact (resize,
    /// non-left mouse buttons).
    #[must_use]
    pub const fn pointer(&self) -> Option<PointerSample> {
        match *self {
            Self::TouchStart { id, position, .. } => Some(PointerSample {
                pointer: PointerId::Touch(id),
                phase: TouchPhase::Down,
                position: Some(position),
            }),
            Self::TouchMove { id, position, .. } => Some(PointerSample {
                pointer: PointerId::Touch(id),
                phase: TouchPhase::Move,
                position: Some(position),
            }),
            Self::TouchEnd { id, position } => Some(PointerSample {
                pointer: PointerId::Touch(id),
                phase: TouchPhase::Up,
                position: Some(position),
            }),
            Self::TouchCancel { id } => Some(PointerSample {
                pointer: PointerId::Touch(id),
                phase: TouchPhase::Cancel,
                position: None,
            }),
            Self::MouseDown {
                position,
                button: MouseButton::Left,
            } => Some(PointerSample {
                pointer: PointerId::Mouse,
                phase: TouchPhase::Down,
                position: Some(position),
            }),
            Self::MouseMove { position } => Some(PointerSample {
                pointer: PointerId::Mouse,
                phase: TouchPhase::Move,
                position: Some(position),
            }),
            Self::MouseUp {
                position,
                button: MouseButton::Left,
            } => Some(PointerSample {
                pointer: PointerId::Mouse,
                phase: TouchPhase::Up,
                position: Some(position),
            }),
            _ => None,
        }
    }
}

/// Touch identifier for multi-touch tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct TouchId(pub u32);

/// Source of a pointer contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerId {
    /// The primary mouse button
    Mouse,
    /// A finger
    Touch(TouchId),
}

/// Phase of a pointer contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Contact started
    Down,
    /// Contact moved
    Move,
    /// Contact lifted
    Up,
    /// Contact taken away by the system
    Cancel,
}

/// A pointer event reduced to id, phase and position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Which contact this is
    pub pointer: PointerId,
    /// Phase of the contact
    pub phase: TouchPhase,
    /// Position, absent for cancellations
    pub position: Option<Point>,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (wheel click)
    Middle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_start_pointer() {
        let sample = Event::touch_start(3, Point::new(1.0, 2.0)).pointer().unwrap();
        assert_eq!(sample.pointer, PointerId::Touch(TouchId(3)));
        assert_eq!(sample.phase, TouchPhase::Down);
        assert_eq!(sample.position, Some(Point::new(1.0, 2.0)));
    }

    #[test]
    fn test_touch_cancel_has_no_position() {
        let sample = Event::touch_cancel(0).pointer().unwrap();
        assert_eq!(sample.phase, TouchPhase::Cancel);
        assert_eq!(sample.position, None);
    }

    #[test]
    fn test_left_mouse_is_pointer() {
        let down = Event::MouseDown {
            position: Point::new(5.0, 5.0),
            button: MouseButton::Left,
        };
        let up = Event::MouseUp {
            position: Point::new(6.0, 5.0),
            button: MouseButton::Left,
        };
        assert_eq!(down.pointer().unwrap().phase, TouchPhase::Down);
        assert_eq!(up.pointer().unwrap().phase, TouchPhase::Up);
        assert_eq!(up.pointer().unwrap().pointer, PointerId::Mouse);
    }

    #[test]
    fn test_right_mouse_is_ignored() {
        let down = Event::MouseDown {
            position: Point::ORIGIN,
            button: MouseButton::Right,
        };
        assert!(down.pointer().is_none());
    }

    #[test]
    fn test_resize_is_not_pointer() {
        let e = Event::Resize {
            width: 100.0,
            height: 50.0,
        };
        assert!(e.pointer().is_none());
    }

    #[test]
    fn test_event_serde_round_trip() {
        let e = Event::touch_move(1, Point::new(10.0, 0.0));
        let json = serde_json::to_string(&e).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(e, back);
    }
}
