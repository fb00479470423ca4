// Copyright 2025 the GeoCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use geocanvas_geometry::{FillRule, Geometry, Polygon, outer_ring_path};
use geocanvas_view::GeoViewport;
use peniko::Color;

use crate::{RenderSurface, RenderSurfaceExt};

/// Paint parameters for a single [`draw_geometry`] call.
#[derive(Clone, Copy, Debug)]
pub struct GeometryStyle {
    /// Outline width in logical pixels; `0` disables stroking.
    ///
    /// For `Point` geometries this is the dot radius instead.
    pub line_width: f64,
    /// Outline color.
    pub line_color: Color,
    /// Interior color; `None` leaves polygons unfilled.
    pub fill_color: Option<Color>,
}

impl Default for GeometryStyle {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            line_color: Color::BLACK,
            fill_color: None,
        }
    }
}

impl GeometryStyle {
    /// A stroke-only style.
    #[must_use]
    pub fn stroked(line_width: f64, line_color: Color) -> Self {
        Self {
            line_width,
            line_color,
            fill_color: None,
        }
    }

    /// Returns a copy of this style that also fills with `color`.
    #[must_use]
    pub fn with_fill(self, color: Color) -> Self {
        Self {
            fill_color: Some(color),
            ..self
        }
    }
}

/// Emits `geometry` onto `surface` in the pixel space of `viewport`.
///
/// - `Polygon` / `MultiPolygon`: each outer ring is filled with `fill_rule`
///   (when a fill color is set) and then stroked (when `line_width > 0`).
///   Inner rings are not drawn.
/// - `LineString`: stroked once along all positions.
/// - `Point`: a dot of radius `line_width`, filled with the fill color or,
///   failing that, the line color.
/// - Unsupported kinds draw nothing.
///
/// Stroke widths are scaled by the surface's device pixel ratio.
pub fn draw_geometry<S: RenderSurface + ?Sized>(
    surface: &mut S,
    viewport: &GeoViewport,
    geometry: &Geometry,
    style: &GeometryStyle,
    fill_rule: FillRule,
) {
    match geometry {
        Geometry::Polygon(polygon) => draw_polygon(surface, viewport, polygon, style, fill_rule),
        Geometry::MultiPolygon(polygons) => {
            for polygon in polygons {
                draw_polygon(surface, viewport, polygon, style, fill_rule);
            }
        }
        Geometry::LineString(coords) => {
            let mut pixels = coords.iter().map(|&geo| viewport.geo_to_pixel(geo));
            let (Some(first), Some(second)) = (pixels.next(), pixels.next()) else {
                return;
            };
            if style.line_width <= 0.0 {
                return;
            }
            surface.begin_path();
            surface.move_to(first);
            surface.line_to(second);
            for px in pixels {
                surface.line_to(px);
            }
            let width = style.line_width * surface.device_pixel_ratio();
            surface.stroke(style.line_color, width);
        }
        Geometry::Point(geo) => {
            surface.begin_path();
            surface.circle(viewport.geo_to_pixel(*geo), style.line_width);
            surface.close_path();
            surface.fill(style.fill_color.unwrap_or(style.line_color), fill_rule);
        }
        Geometry::Unsupported { kind } => {
            log::debug!("skipping unsupported geometry type `{kind}`");
        }
    }
}

fn draw_polygon<S: RenderSurface + ?Sized>(
    surface: &mut S,
    viewport: &GeoViewport,
    polygon: &Polygon,
    style: &GeometryStyle,
    fill_rule: FillRule,
) {
    let Some(ring) = polygon.outer_ring() else {
        return;
    };
    let path = outer_ring_path(ring, viewport);
    if path.elements().is_empty() {
        return;
    }
    surface.set_path(&path);
    if let Some(fill) = style.fill_color {
        surface.fill(fill, fill_rule);
    }
    if style.line_width > 0.0 {
        let width = style.line_width * surface.device_pixel_ratio();
        surface.stroke(style.line_color, width);
    }
}
