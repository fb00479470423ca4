// Copyright 2025 the GeoCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalized pointer input.

use kurbo::Point;

/// What happened to the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEventKind {
    /// Mouse button or touch pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Mouse button or touch released.
    Up,
    /// Pointer left the widget.
    Leave,
    /// The platform aborted the gesture.
    Cancel,
    /// Wheel scrolled; positive `delta_y` scrolls down (zooms out).
    Wheel {
        /// Vertical scroll amount, sign only is used.
        delta_y: f64,
    },
}

/// A mouse or touch event in logical pixels relative to the widget's
/// top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Event kind.
    pub kind: PointerEventKind,
    /// Pointer position in logical pixels.
    pub position: Point,
}

impl PointerEvent {
    /// Creates an event.
    #[must_use]
    pub fn new(kind: PointerEventKind, position: Point) -> Self {
        Self { kind, position }
    }

    /// A press at `position`.
    #[must_use]
    pub fn down(position: Point) -> Self {
        Self::new(PointerEventKind::Down, position)
    }

    /// A move to `position`.
    #[must_use]
    pub fn move_to(position: Point) -> Self {
        Self::new(PointerEventKind::Move, position)
    }

    /// A release at `position`.
    #[must_use]
    pub fn up(position: Point) -> Self {
        Self::new(PointerEventKind::Up, position)
    }

    /// The pointer left the widget at `position`.
    #[must_use]
    pub fn leave(position: Point) -> Self {
        Self::new(PointerEventKind::Leave, position)
    }

    /// The gesture was cancelled at `position`.
    #[must_use]
    pub fn cancel(position: Point) -> Self {
        Self::new(PointerEventKind::Cancel, position)
    }

    /// A wheel scroll over `position`.
    #[must_use]
    pub fn wheel(position: Point, delta_y: f64) -> Self {
        Self::new(PointerEventKind::Wheel { delta_y }, position)
    }

    /// Builds an event from the touches a touch event reports.
    ///
    /// A touch-down is only accepted with exactly one touch; pinches and
    /// other multi-finger presses yield `None`. Other kinds use the first
    /// touch and yield `None` when there is none.
    #[must_use]
    pub fn from_touches(kind: PointerEventKind, touches: &[Point]) -> Option<Self> {
        match (kind, touches) {
            (PointerEventKind::Down, [touch]) => Some(Self::new(kind, *touch)),
            (PointerEventKind::Down, _) => None,
            (_, [first, ..]) => Some(Self::new(kind, *first)),
            (_, []) => None,
        }
    }

    /// Returns the position converted to device pixels.
    #[must_use]
    pub fn device_position(&self, device_pixel_ratio: f64) -> Point {
        (self.position.to_vec2() * device_pixel_ratio).to_point()
    }
}
