// Copyright 2025 the GeoCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`RenderSurface`] that records what it is asked to paint.
//!
//! It is intentionally *not* a renderer:
//! - It does **not** rasterize to pixels.
//! - Snapshots hold the operations painted since the last clear rather than
//!   an image.
//! - It is intended primarily for tests and debugging that want to assert on
//!   emitted operations.

use alloc::vec::Vec;

use kurbo::{BezPath, Circle, Point, Shape, Size, Vec2};
use peniko::Color;

use crate::{FillRule, RenderSurface};

const CIRCLE_TOLERANCE: f64 = 0.1;

/// One painting operation received by a [`RecordingSurface`].
#[derive(Clone, Debug)]
pub enum SurfaceOp {
    /// The surface was cleared to a color.
    Clear(Color),
    /// The current path was filled.
    Fill {
        /// Current path at the time of filling.
        path: BezPath,
        /// Fill color.
        color: Color,
        /// Fill rule used.
        rule: FillRule,
    },
    /// The current path was stroked.
    Stroke {
        /// Current path at the time of stroking.
        path: BezPath,
        /// Stroke color.
        color: Color,
        /// Stroke width in device pixels.
        width: f64,
    },
    /// The surface contents were captured.
    Capture {
        /// Identifier of the produced snapshot.
        snapshot: u32,
    },
    /// A snapshot was drawn back onto the surface.
    Blit {
        /// Identifier of the drawn snapshot.
        snapshot: u32,
        /// Offset of the snapshot's top-left corner.
        offset: Vec2,
    },
}

/// Snapshot produced by [`RecordingSurface::capture`].
#[derive(Clone, Debug)]
pub struct RecordedSnapshot {
    /// Identifier, unique per surface.
    pub id: u32,
    /// Operations painted since the most recent clear, in order.
    pub ops: Vec<SurfaceOp>,
}

/// Recording implementation of [`RenderSurface`].
///
/// This surface:
/// - Tracks its size and device pixel ratio,
/// - Builds the current path as a [`BezPath`],
/// - Appends a [`SurfaceOp`] for every clear, fill, stroke, capture and blit.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    size: Size,
    device_pixel_ratio: f64,
    path: BezPath,
    /// Log of operations in the order they were applied.
    ops: Vec<SurfaceOp>,
    /// Index of the most recent `Clear` in `ops`, if any.
    frame_start: usize,
    next_snapshot: u32,
}

impl RecordingSurface {
    /// Creates a surface with extents in device pixels.
    #[must_use]
    pub fn new(size: Size, device_pixel_ratio: f64) -> Self {
        Self {
            size,
            device_pixel_ratio,
            path: BezPath::new(),
            ops: Vec::new(),
            frame_start: 0,
            next_snapshot: 0,
        }
    }

    /// Resizes the surface, as an embedder would on a window resize.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Changes the device pixel ratio.
    pub fn set_device_pixel_ratio(&mut self, ratio: f64) {
        self.device_pixel_ratio = ratio;
    }

    /// Returns every recorded operation.
    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Returns the operations since the most recent clear.
    #[must_use]
    pub fn frame_ops(&self) -> &[SurfaceOp] {
        &self.ops[self.frame_start..]
    }

    /// Counts recorded operations matching `pred`.
    #[must_use]
    pub fn count(&self, pred: impl Fn(&SurfaceOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    /// Forgets all recorded operations.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
        self.frame_start = 0;
    }
}

impl RenderSurface for RecordingSurface {
    type Snapshot = RecordedSnapshot;

    fn size(&self) -> Size {
        self.size
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    fn clear(&mut self, color: Color) {
        self.frame_start = self.ops.len();
        self.ops.push(SurfaceOp::Clear(color));
    }

    fn begin_path(&mut self) {
        self.path = BezPath::new();
    }

    fn move_to(&mut self, p: Point) {
        self.path.move_to(p);
    }

    fn line_to(&mut self, p: Point) {
        if self.path.elements().is_empty() {
            self.path.move_to(p);
        } else {
            self.path.line_to(p);
        }
    }

    fn circle(&mut self, center: Point, radius: f64) {
        self.path
            .extend(Circle::new(center, radius).path_elements(CIRCLE_TOLERANCE));
    }

    fn close_path(&mut self) {
        if !self.path.elements().is_empty() {
            self.path.close_path();
        }
    }

    fn fill(&mut self, color: Color, rule: FillRule) {
        self.ops.push(SurfaceOp::Fill {
            path: self.path.clone(),
            color,
            rule,
        });
    }

    fn stroke(&mut self, color: Color, width: f64) {
        self.ops.push(SurfaceOp::Stroke {
            path: self.path.clone(),
            color,
            width,
        });
    }

    fn capture(&mut self) -> Self::Snapshot {
        let id = self.next_snapshot;
        self.next_snapshot = self.next_snapshot.wrapping_add(1);
        let snapshot = RecordedSnapshot {
            id,
            ops: self.frame_ops().to_vec(),
        };
        self.ops.push(SurfaceOp::Capture { snapshot: id });
        snapshot
    }

    fn draw_snapshot(&mut self, snapshot: &Self::Snapshot, offset: Vec2) {
        self.ops.push(SurfaceOp::Blit {
            snapshot: snapshot.id,
            offset,
        });
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};
    use peniko::Color;

    use super::{RecordingSurface, SurfaceOp};
    use crate::{FillRule, RenderSurface};

    #[test]
    fn paths_are_captured_at_paint_time() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0), 1.0);
        surface.begin_path();
        surface.move_to(Point::new(0.0, 0.0));
        surface.line_to(Point::new(5.0, 0.0));
        surface.line_to(Point::new(5.0, 5.0));
        surface.close_path();
        surface.fill(Color::WHITE, FillRule::NonZero);
        surface.begin_path();
        surface.stroke(Color::BLACK, 1.0);

        let [SurfaceOp::Fill { path: filled, .. }, SurfaceOp::Stroke { path: stroked, .. }] =
            surface.ops()
        else {
            panic!("unexpected ops: {:?}", surface.ops());
        };
        assert_eq!(filled.elements().len(), 4);
        assert!(stroked.elements().is_empty());
    }

    #[test]
    fn snapshot_holds_current_frame() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0), 1.0);
        surface.clear(Color::BLACK);
        surface.fill(Color::WHITE, FillRule::NonZero);
        surface.clear(Color::WHITE);
        surface.stroke(Color::BLACK, 2.0);

        let snapshot = surface.capture();
        assert_eq!(snapshot.id, 0);
        assert_eq!(snapshot.ops.len(), 2);
        assert!(matches!(snapshot.ops[0], SurfaceOp::Clear(_)));
        assert!(matches!(snapshot.ops[1], SurfaceOp::Stroke { .. }));

        surface.draw_snapshot(&snapshot, Vec2::new(3.0, -1.0));
        assert!(matches!(
            surface.ops().last(),
            Some(SurfaceOp::Blit { snapshot: 0, offset }) if *offset == Vec2::new(3.0, -1.0)
        ));
        assert_eq!(surface.capture().id, 1);
    }

    #[test]
    fn count_and_clear_ops() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0), 1.0);
        surface.clear(Color::BLACK);
        surface.clear(Color::BLACK);
        let _ = surface.capture();
        assert_eq!(surface.count(|op| matches!(op, SurfaceOp::Clear(_))), 2);
        surface.clear_ops();
        assert!(surface.ops().is_empty());
        assert!(surface.frame_ops().is_empty());
    }
}
