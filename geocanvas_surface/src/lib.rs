// Copyright 2025 the GeoCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GeoCanvas Surface: the drawing capability the map widget renders through.
//!
//! The widget never talks to a concrete canvas. It drives a
//! [`RenderSurface`]: clear to a color, build a path, fill or stroke it,
//! capture the whole surface as an opaque snapshot, and blit a snapshot back
//! at an offset. Creating and sizing the real surface is the embedder's job.
//!
//! On top of that trait this crate provides:
//! - [`draw_geometry`]: how each [`Geometry`] kind is emitted as path
//!   operations in pixel space.
//! - [`RecordingSurface`]: an in-memory surface that records the operations
//!   it receives, for tests and debugging. It does not rasterize.
//!
//! ```rust
//! use geocanvas_geometry::{FillRule, Geometry, Polygon};
//! use geocanvas_surface::{GeometryStyle, RecordingSurface, RenderSurface, SurfaceOp, draw_geometry};
//! use geocanvas_view::GeoViewport;
//! use kurbo::{Point, Size};
//! use peniko::Color;
//!
//! let mut surface = RecordingSurface::new(Size::new(400.0, 300.0), 1.0);
//! let mut view = GeoViewport::new(surface.size());
//! view.center_on(Point::new(138.0, 36.0));
//!
//! let ring = vec![
//!     Point::new(137.0, 35.0),
//!     Point::new(137.0, 37.0),
//!     Point::new(139.0, 37.0),
//!     Point::new(139.0, 35.0),
//! ];
//! let polygon = Geometry::Polygon(Polygon::new(vec![ring]));
//! let style = GeometryStyle::default().with_fill(Color::WHITE);
//!
//! surface.clear(Color::BLACK);
//! draw_geometry(&mut surface, &view, &polygon, &style, FillRule::NonZero);
//!
//! assert!(matches!(surface.ops()[1], SurfaceOp::Fill { .. }));
//! assert!(matches!(surface.ops()[2], SurfaceOp::Stroke { .. }));
//! ```

#![no_std]

extern crate alloc;

mod draw;
mod recording;

use kurbo::{BezPath, PathEl, Point, Size, Vec2};

pub use draw::{GeometryStyle, draw_geometry};
pub use geocanvas_geometry::{FillRule, Geometry};
pub use peniko::Color;
pub use recording::{RecordedSnapshot, RecordingSurface, SurfaceOp};

/// A 2D drawing surface sized in device pixels.
///
/// Path operations follow the usual canvas model: `begin_path` starts a new
/// current path, `move_to`/`line_to`/`circle`/`close_path` extend it, and
/// `fill`/`stroke` paint it without consuming it.
pub trait RenderSurface {
    /// Opaque captured image of the surface contents.
    type Snapshot;

    /// Surface extents in device pixels.
    fn size(&self) -> Size;

    /// Device pixels per logical (CSS) pixel.
    fn device_pixel_ratio(&self) -> f64;

    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Start a new, empty current path.
    fn begin_path(&mut self);

    /// Begin a new subpath at `p`.
    fn move_to(&mut self, p: Point);

    /// Add a straight segment to `p`.
    fn line_to(&mut self, p: Point);

    /// Add a full circle as its own subpath.
    fn circle(&mut self, center: Point, radius: f64);

    /// Close the current subpath.
    fn close_path(&mut self);

    /// Fill the current path.
    fn fill(&mut self, color: Color, rule: FillRule);

    /// Stroke the current path with a width in device pixels.
    fn stroke(&mut self, color: Color, width: f64);

    /// Capture the current contents.
    ///
    /// This may be expensive (a full-surface copy); callers should capture
    /// once per gesture, not per frame.
    fn capture(&mut self) -> Self::Snapshot;

    /// Draw a previously captured snapshot with its top-left corner at `offset`.
    fn draw_snapshot(&mut self, snapshot: &Self::Snapshot, offset: Vec2);
}

/// Convenience helpers available on every [`RenderSurface`].
pub trait RenderSurfaceExt: RenderSurface {
    /// Replace the current path with `path`.
    ///
    /// Quadratic and cubic segments are flattened to their end points; the
    /// widget only ever produces straight segments.
    fn set_path(&mut self, path: &BezPath) {
        self.begin_path();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => self.move_to(p),
                PathEl::LineTo(p) | PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => {
                    self.line_to(p);
                }
                PathEl::ClosePath => self.close_path(),
            }
        }
    }
}

impl<S: RenderSurface + ?Sized> RenderSurfaceExt for S {}
