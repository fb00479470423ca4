// Copyright 2025 the GeoCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel-space hit testing against polygon outer rings.
//!
//! A polygon's outer ring is converted to a closed [`BezPath`] in device
//! pixels, exactly as it is emitted for drawing, and queried with the winding
//! number under the caller's fill rule. Drawing and hit testing therefore
//! agree on what counts as "inside the filled shape".

use kurbo::{BezPath, Point, Shape};

use crate::{FillRule, GeoViewport, Geometry, Polygon};

/// Sentinel pixel meaning "no position latched". Never hits anything.
pub const UNLATCHED: Point = Point::new(-1.0, -1.0);

/// Builds the closed pixel-space path for a ring.
///
/// Rings with fewer than three positions enclose nothing and produce an empty
/// path.
#[must_use]
pub fn outer_ring_path(ring: &[Point], viewport: &GeoViewport) -> BezPath {
    let mut path = BezPath::new();
    if ring.len() < 3 {
        return path;
    }
    let mut positions = ring.iter().map(|&geo| viewport.geo_to_pixel(geo));
    if let Some(first) = positions.next() {
        path.move_to(first);
        for px in positions {
            path.line_to(px);
        }
        path.close_path();
    }
    path
}

/// Returns `true` if the device pixel `px` falls inside `geometry`.
///
/// - [`UNLATCHED`] always yields `false`.
/// - `Polygon`: inside its outer ring; holes are ignored.
/// - `MultiPolygon`: inside any constituent outer ring.
/// - `Point`, `LineString` and unsupported kinds: always `false`.
#[must_use]
pub fn is_point_in_geometry(
    geometry: &Geometry,
    viewport: &GeoViewport,
    px: Point,
    fill_rule: FillRule,
) -> bool {
    if px == UNLATCHED {
        return false;
    }
    match geometry {
        Geometry::Polygon(polygon) => polygon_contains(polygon, viewport, px, fill_rule),
        Geometry::MultiPolygon(polygons) => polygons
            .iter()
            .any(|polygon| polygon_contains(polygon, viewport, px, fill_rule)),
        Geometry::Point(_) | Geometry::LineString(_) | Geometry::Unsupported { .. } => false,
    }
}

fn polygon_contains(polygon: &Polygon, viewport: &GeoViewport, px: Point, rule: FillRule) -> bool {
    let Some(ring) = polygon.outer_ring() else {
        return false;
    };
    let path = outer_ring_path(ring, viewport);
    if path.elements().is_empty() {
        return false;
    }
    let winding = path.winding(px);
    match rule {
        FillRule::NonZero => winding != 0,
        FillRule::EvenOdd => winding % 2 != 0,
    }
}
