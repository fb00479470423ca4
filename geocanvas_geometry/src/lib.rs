// Copyright 2025 the GeoCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GeoCanvas Geometry: the geometry model drawn by the map widget, plus hit testing.
//!
//! Geometries arrive as GeoJSON‑shaped `{type, coordinates}` objects and are
//! decoded with `serde` into [`Geometry`]. Positions are carried as
//! [`kurbo::Point`] with `x = lon` and `y = lat`.
//!
//! Only the outer ring of a polygon (`rings[0]`) is ever filled or hit
//! tested. Inner rings are kept in the data but ignored, so a point inside a
//! hole still counts as inside the polygon.
//!
//! Hit testing happens in pixel space through a [`GeoViewport`], using the
//! same fill rule the surface uses to fill the shape:
//!
//! ```rust
//! use geocanvas_geometry::{FillRule, Geometry, is_point_in_geometry};
//! use geocanvas_view::GeoViewport;
//! use kurbo::{Point, Size};
//!
//! let square: Geometry = serde_json::from_str(
//!     r#"{"type": "Polygon", "coordinates": [[[0, 0], [0, 10], [10, 10], [10, 0], [0, 0]]]}"#,
//! )
//! .unwrap();
//!
//! let mut view = GeoViewport::new(Size::new(10.0, 10.0));
//! view.set_scale_limits(0.5, 2.0);
//! view.set_scale(1.0);
//! view.set_origin(Point::new(5.0, 5.0));
//!
//! // Pixel (0, 0) shows lon/lat (5, 5), inside the square.
//! assert!(is_point_in_geometry(&square, &view, Point::new(0.0, 0.0), FillRule::NonZero));
//! assert!(!is_point_in_geometry(&square, &view, Point::new(-6.0, 5.0), FillRule::NonZero));
//! ```
//!
//! `Point` and `LineString` geometries are drawable but never hit.
//! Geometry types this crate does not know decode to
//! [`Geometry::Unsupported`], which neither draws nor hits.

#![no_std]

extern crate alloc;

mod error;
mod geojson;
mod hit;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use serde::Deserialize;

pub use error::GeometryError;
pub use geocanvas_view::GeoViewport;
pub use hit::{UNLATCHED, is_point_in_geometry, outer_ring_path};
pub use peniko::Fill as FillRule;

/// An ordered sequence of lon/lat positions.
pub type Ring = Vec<Point>;

/// A polygon as a list of rings; the first ring is the exterior boundary.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    /// Outer ring followed by any inner rings (holes).
    pub rings: Vec<Ring>,
}

impl Polygon {
    /// Creates a polygon from its rings.
    #[must_use]
    pub fn new(rings: Vec<Ring>) -> Self {
        Self { rings }
    }

    /// Returns the exterior boundary, if the polygon has any ring at all.
    #[must_use]
    pub fn outer_ring(&self) -> Option<&[Point]> {
        self.rings.first().map(Vec::as_slice)
    }

    /// Returns the inner rings. These are never drawn or hit tested.
    #[must_use]
    pub fn holes(&self) -> &[Ring] {
        self.rings.get(1..).unwrap_or_default()
    }
}

/// A geometry the widget knows how to draw.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "geojson::RawGeometry")]
pub enum Geometry {
    /// A single position, drawn as a filled dot.
    Point(Point),
    /// An open polyline, stroked only.
    LineString(Vec<Point>),
    /// A polygon; only its outer ring is filled and hit tested.
    Polygon(Polygon),
    /// A set of polygons.
    MultiPolygon(Vec<Polygon>),
    /// A geometry type outside the set above. Draws nothing and never hits.
    Unsupported {
        /// The GeoJSON `type` string that was not recognized.
        kind: String,
    },
}

impl Geometry {
    /// Returns the GeoJSON `type` name of this geometry.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Point(_) => "Point",
            Self::LineString(_) => "LineString",
            Self::Polygon(_) => "Polygon",
            Self::MultiPolygon(_) => "MultiPolygon",
            Self::Unsupported { kind } => kind,
        }
    }

    /// Returns `true` for geometry kinds that can report a hit.
    #[must_use]
    pub fn is_hit_testable(&self) -> bool {
        matches!(self, Self::Polygon(_) | Self::MultiPolygon(_))
    }
}
