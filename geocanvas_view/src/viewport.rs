// Copyright 2025 the GeoCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Factor applied to the scale by one wheel notch or zoom button press.
pub const ZOOM_STEP: f64 = 2.0;

/// Initial scale of a new viewport, in degrees per device pixel.
pub const DEFAULT_SCALE: f64 = 0.02048;

/// Default lower scale bound (most zoomed in), in degrees per device pixel.
pub const DEFAULT_MIN_SCALE: f64 = 0.00016;

/// Default upper scale bound (most zoomed out), in degrees per device pixel.
pub const DEFAULT_MAX_SCALE: f64 = 0.08192;

/// Map viewport over the longitude/latitude plane.
///
/// `GeoViewport` tracks the geographic coordinate shown at the device pixel
/// origin (the top‑left corner of the view), a uniform scale in degrees per
/// device pixel, and the view extents. It can be used to:
/// - Convert points between geographic degrees and device pixels.
/// - Pan by a device‑pixel delta.
/// - Zoom around a chosen anchor pixel within scale bounds.
///
/// Geographic points are carried in [`Point`] with `x = lon` and `y = lat`.
#[derive(Clone, Debug)]
pub struct GeoViewport {
    view_size: Size,
    origin: Point,
    scale: f64,
    min_scale: f64,
    max_scale: f64,
}

impl GeoViewport {
    /// Creates a new viewport with the given extents in device pixels.
    ///
    /// - Initial origin is `(0, 0)` degrees.
    /// - Initial scale is [`DEFAULT_SCALE`].
    /// - Scale is bounded by `[DEFAULT_MIN_SCALE, DEFAULT_MAX_SCALE]`.
    #[must_use]
    pub fn new(view_size: Size) -> Self {
        Self {
            view_size,
            origin: Point::ZERO,
            scale: DEFAULT_SCALE,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
        }
    }

    /// Returns the view extents in device pixels.
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Sets the view extents in device pixels.
    ///
    /// The origin and scale are kept, so the coordinate at the top‑left
    /// corner stays fixed while the visible region grows or shrinks.
    pub fn set_view_size(&mut self, size: Size) {
        self.view_size = size;
    }

    /// Returns the geographic coordinate mapped to the pixel origin.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Moves the viewport so that `geo` maps to the pixel origin.
    pub fn set_origin(&mut self, geo: Point) {
        if !geo.is_finite() {
            return;
        }
        self.origin = geo;
    }

    /// Returns the current scale in degrees per device pixel.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the lower scale bound.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Returns the upper scale bound.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Sets the minimum and maximum scale.
    ///
    /// The provided range is normalized so that `min_scale <= max_scale`.
    /// Non‑positive or non‑finite bounds are ignored. If the current scale
    /// falls outside the new range it is clamped into it, anchored at the
    /// view center.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        if !(min_scale.is_finite() && max_scale.is_finite()) || min_scale <= 0.0 {
            return;
        }
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        let clamped = self.scale.clamp(min_scale, max_scale);
        if clamped != self.scale {
            self.set_scale(clamped);
        }
    }

    /// Returns `true` if `scale` lies within the configured bounds.
    #[must_use]
    pub fn accepts_scale(&self, scale: f64) -> bool {
        scale.is_finite() && scale >= self.min_scale && scale <= self.max_scale
    }

    /// Sets the scale, keeping the coordinate at the view center fixed.
    ///
    /// Returns `false` and leaves the viewport untouched if `scale` is outside
    /// `[min_scale, max_scale]`.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        let anchor = self.view_center_px();
        self.set_scale_about(scale, anchor)
    }

    /// Sets the scale, keeping the coordinate under `anchor` fixed on screen.
    ///
    /// Returns `false` and leaves the viewport untouched if `scale` is outside
    /// `[min_scale, max_scale]`.
    pub fn set_scale_about(&mut self, scale: f64, anchor: Point) -> bool {
        if !self.accepts_scale(scale) || !anchor.is_finite() {
            return false;
        }
        let ds = scale - self.scale;
        self.origin.x -= anchor.x * ds;
        self.origin.y += anchor.y * ds;
        self.scale = scale;
        true
    }

    /// Zooms in one [`ZOOM_STEP`] around `anchor`.
    pub fn zoom_in_about(&mut self, anchor: Point) -> bool {
        self.set_scale_about(self.scale / ZOOM_STEP, anchor)
    }

    /// Zooms out one [`ZOOM_STEP`] around `anchor`.
    pub fn zoom_out_about(&mut self, anchor: Point) -> bool {
        self.set_scale_about(self.scale * ZOOM_STEP, anchor)
    }

    /// Pans the view by a delta in device pixels.
    ///
    /// Dragging the content right by `delta.x` pixels moves the origin west;
    /// dragging it down moves the origin north.
    pub fn pan(&mut self, delta: Vec2) {
        if !delta.is_finite() {
            return;
        }
        self.origin.x -= delta.x * self.scale;
        self.origin.y += delta.y * self.scale;
    }

    /// Centers the view on the given geographic coordinate.
    pub fn center_on(&mut self, geo: Point) {
        if !geo.is_finite() {
            return;
        }
        let half = self.view_center_px();
        self.origin = Point::new(geo.x - half.x * self.scale, geo.y + half.y * self.scale);
    }

    /// Returns the geographic coordinate at the center of the view.
    #[must_use]
    pub fn center(&self) -> Point {
        self.pixel_to_geo(self.view_center_px())
    }

    /// Converts a geographic coordinate into device pixels.
    #[must_use]
    pub fn geo_to_pixel(&self, geo: Point) -> Point {
        Point::new(
            (geo.x - self.origin.x) / self.scale,
            (self.origin.y - geo.y) / self.scale,
        )
    }

    /// Converts a device pixel into a geographic coordinate.
    #[must_use]
    pub fn pixel_to_geo(&self, px: Point) -> Point {
        Point::new(
            self.origin.x + px.x * self.scale,
            self.origin.y - px.y * self.scale,
        )
    }

    /// Returns the geo → pixel mapping as an affine transform.
    ///
    /// Useful for converting whole paths at once; agrees with
    /// [`GeoViewport::geo_to_pixel`] up to rounding.
    #[must_use]
    pub fn geo_to_pixel_transform(&self) -> Affine {
        let inv = 1.0 / self.scale;
        Affine::new([
            inv,
            0.0,
            0.0,
            -inv,
            -self.origin.x * inv,
            self.origin.y * inv,
        ])
    }

    /// Returns the visible geographic rectangle (lon on x, lat on y).
    #[must_use]
    pub fn visible_geo_rect(&self) -> Rect {
        let top_left = self.pixel_to_geo(Point::ZERO);
        let bottom_right =
            self.pixel_to_geo(Point::new(self.view_size.width, self.view_size.height));
        Rect::from_points(top_left, bottom_right)
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> GeoViewportDebugInfo {
        GeoViewportDebugInfo {
            view_size: self.view_size,
            origin: self.origin,
            center: self.center(),
            visible_geo_rect: self.visible_geo_rect(),
            scale: self.scale,
            min_scale: self.min_scale,
            max_scale: self.max_scale,
        }
    }

    fn view_center_px(&self) -> Point {
        Point::new(self.view_size.width / 2.0, self.view_size.height / 2.0)
    }
}

/// Debug snapshot of a [`GeoViewport`] state.
#[derive(Clone, Copy, Debug)]
pub struct GeoViewportDebugInfo {
    /// View extents in device pixels.
    pub view_size: Size,
    /// Geographic coordinate at the pixel origin.
    pub origin: Point,
    /// Geographic coordinate at the view center.
    pub center: Point,
    /// Geographic rectangle currently visible through the view.
    pub visible_geo_rect: Rect,
    /// Current scale in degrees per device pixel.
    pub scale: f64,
    /// Lower scale bound.
    pub min_scale: f64,
    /// Upper scale bound.
    pub max_scale: f64,
}
