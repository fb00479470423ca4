// Copyright 2025 the GeoCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press/drag/release state machine that tells clicks apart from pans.
//!
//! A gesture moves through `Idle → Armed → Dragging → Idle`:
//! 1) [`DragGesture::arm`] on pointer-down, handing over a snapshot of the
//!    rendered surface (or `None` when dragging is disabled).
//! 2) The first [`DragGesture::update`] after arming records the drag start;
//!    later updates report the offset from that start together with the
//!    snapshot to blit.
//! 3) [`DragGesture::release`] ends the gesture. A release straight from
//!    `Armed` is a click; a release while dragging commits the total offset.
//!
//! [`DragGesture::leave`] and [`DragGesture::cancel`] also commit, so a pan
//! in progress is never discarded.
//!
//! ## Minimal example
//!
//! ```
//! use geocanvas::gesture::{DragEnd, DragGesture, DragMove};
//! use kurbo::{Point, Vec2};
//!
//! let mut gesture = DragGesture::<&str>::default();
//! assert!(gesture.arm(Some("frame")));
//!
//! assert!(matches!(gesture.update(Point::new(0.0, 0.0)), DragMove::Started));
//! let DragMove::Moved { offset, snapshot } = gesture.update(Point::new(4.0, 3.0)) else {
//!     unreachable!();
//! };
//! assert_eq!(offset, Vec2::new(4.0, 3.0));
//! assert_eq!(*snapshot, "frame");
//!
//! assert_eq!(gesture.release(Point::new(6.0, 3.0)), DragEnd::Commit(Vec2::new(6.0, 3.0)));
//! assert!(!gesture.is_dragging());
//! ```

use core::mem;

use kurbo::{Point, Vec2};

/// Coarse phase of a [`DragGesture`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GesturePhase {
    /// No button or touch is down.
    #[default]
    Idle,
    /// Pressed, not yet moved.
    Armed,
    /// Moving with the button or touch held.
    Dragging,
}

/// Result of feeding a pointer move to a [`DragGesture`].
#[derive(Debug)]
pub enum DragMove<'a, I> {
    /// The move does not belong to a drag.
    Ignored,
    /// The drag started at this position; nothing moved yet.
    Started,
    /// The drag moved.
    Moved {
        /// Offset from the drag start to the current position.
        offset: Vec2,
        /// Snapshot taken when the gesture was armed.
        snapshot: &'a I,
    },
}

/// How a gesture ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEnd {
    /// No gesture was in progress, or it ended without effect.
    None,
    /// Press and release without movement.
    Click,
    /// A drag ended; pan by this offset.
    Commit(Vec2),
}

#[derive(Debug, Default)]
enum State<I> {
    #[default]
    Idle,
    Armed {
        snapshot: Option<I>,
    },
    Dragging {
        start: Point,
        last: Point,
        snapshot: I,
    },
}

/// Tracks one pointer gesture, holding the surface snapshot `I` while armed.
#[derive(Debug)]
pub struct DragGesture<I> {
    state: State<I>,
}

impl<I> Default for DragGesture<I> {
    fn default() -> Self {
        Self {
            state: State::Idle,
        }
    }
}

impl<I> DragGesture<I> {
    /// Arms the gesture on pointer-down.
    ///
    /// Passing `None` arms a click-only gesture that never becomes a drag.
    /// Returns `false`, dropping `snapshot`, unless the gesture was idle.
    pub fn arm(&mut self, snapshot: Option<I>) -> bool {
        if !matches!(self.state, State::Idle) {
            return false;
        }
        self.state = State::Armed { snapshot };
        true
    }

    /// Feeds a pointer move.
    pub fn update(&mut self, pos: Point) -> DragMove<'_, I> {
        if let State::Armed { snapshot } = &mut self.state {
            let Some(snapshot) = snapshot.take() else {
                return DragMove::Ignored;
            };
            self.state = State::Dragging {
                start: pos,
                last: pos,
                snapshot,
            };
            return DragMove::Started;
        }
        match &mut self.state {
            State::Dragging {
                start,
                last,
                snapshot,
            } => {
                *last = pos;
                DragMove::Moved {
                    offset: pos - *start,
                    snapshot,
                }
            }
            State::Idle | State::Armed { .. } => DragMove::Ignored,
        }
    }

    /// Ends the gesture on pointer-up at `pos`.
    pub fn release(&mut self, pos: Point) -> DragEnd {
        match mem::take(&mut self.state) {
            State::Idle => DragEnd::None,
            State::Armed { .. } => DragEnd::Click,
            State::Dragging { start, .. } => DragEnd::Commit(pos - start),
        }
    }

    /// Ends the gesture because the pointer left the widget at `pos`.
    ///
    /// A drag commits as if released at `pos`; an armed press is dropped.
    pub fn leave(&mut self, pos: Point) -> DragEnd {
        match mem::take(&mut self.state) {
            State::Dragging { start, .. } => DragEnd::Commit(pos - start),
            State::Idle | State::Armed { .. } => DragEnd::None,
        }
    }

    /// Ends the gesture without a final position.
    ///
    /// A drag commits at the last position seen by [`DragGesture::update`].
    pub fn cancel(&mut self) -> DragEnd {
        match mem::take(&mut self.state) {
            State::Dragging { start, last, .. } => DragEnd::Commit(last - start),
            State::Idle | State::Armed { .. } => DragEnd::None,
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        match self.state {
            State::Idle => GesturePhase::Idle,
            State::Armed { .. } => GesturePhase::Armed,
            State::Dragging { .. } => GesturePhase::Dragging,
        }
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, State::Dragging { .. })
    }

    /// Offset from the drag start to the last seen position.
    #[must_use]
    pub fn total_offset(&self) -> Option<Vec2> {
        match &self.state {
            State::Dragging { start, last, .. } => Some(*last - *start),
            State::Idle | State::Armed { .. } => None,
        }
    }
}
