// Copyright 2025 the GeoCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoding of GeoJSON‑shaped geometry objects.
//!
//! The raw record keeps `coordinates` as an arbitrarily nested array so that
//! unknown geometry types still decode (to [`Geometry::Unsupported`]) instead
//! of failing.

use alloc::vec::Vec;

use kurbo::Point;
use serde::Deserialize;

use crate::{Geometry, GeometryError, Polygon, Ring};

#[derive(Debug, Deserialize)]
pub(crate) struct RawGeometry {
    #[serde(rename = "type")]
    kind: alloc::string::String,
    #[serde(default)]
    coordinates: RawCoordinates,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCoordinates {
    Position(Vec<f64>),
    Nested(Vec<RawCoordinates>),
}

impl Default for RawCoordinates {
    fn default() -> Self {
        Self::Nested(Vec::new())
    }
}

impl TryFrom<RawGeometry> for Geometry {
    type Error = GeometryError;

    fn try_from(raw: RawGeometry) -> Result<Self, Self::Error> {
        let geometry = match raw.kind.as_str() {
            "Point" => Self::Point(position(&raw.coordinates, "Point")?),
            "LineString" => Self::LineString(positions(&raw.coordinates, "LineString")?),
            "Polygon" => Self::Polygon(polygon(&raw.coordinates, "Polygon")?),
            "MultiPolygon" => Self::MultiPolygon(
                nested(&raw.coordinates, "MultiPolygon", "an array of polygons")?
                    .iter()
                    .map(|p| polygon(p, "MultiPolygon"))
                    .collect::<Result<_, _>>()?,
            ),
            _ => Self::Unsupported { kind: raw.kind },
        };
        Ok(geometry)
    }
}

fn nested<'a>(
    coords: &'a RawCoordinates,
    kind: &'static str,
    expected: &'static str,
) -> Result<&'a [RawCoordinates], GeometryError> {
    match coords {
        RawCoordinates::Nested(items) => Ok(items),
        // `[]` parses as an empty position; treat it as an empty list.
        RawCoordinates::Position(values) if values.is_empty() => Ok(&[]),
        RawCoordinates::Position(_) => Err(GeometryError::Nesting { kind, expected }),
    }
}

fn position(coords: &RawCoordinates, kind: &'static str) -> Result<Point, GeometryError> {
    let RawCoordinates::Position(values) = coords else {
        return Err(GeometryError::Nesting {
            kind,
            expected: "a [lon, lat] position",
        });
    };
    // Altitude and any further values are ignored.
    match values.as_slice() {
        [lon, lat, ..] if lon.is_finite() && lat.is_finite() => Ok(Point::new(*lon, *lat)),
        [_, _, ..] => Err(GeometryError::NonFinite),
        short => Err(GeometryError::ShortPosition { found: short.len() }),
    }
}

fn positions(coords: &RawCoordinates, kind: &'static str) -> Result<Ring, GeometryError> {
    nested(coords, kind, "an array of positions")?
        .iter()
        .map(|c| position(c, kind))
        .collect()
}

fn polygon(coords: &RawCoordinates, kind: &'static str) -> Result<Polygon, GeometryError> {
    let rings = nested(coords, kind, "an array of rings")?
        .iter()
        .map(|ring| positions(ring, kind))
        .collect::<Result<_, _>>()?;
    Ok(Polygon::new(rings))
}
