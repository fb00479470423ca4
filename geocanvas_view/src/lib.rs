// Copyright 2025 the GeoCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GeoCanvas View: a flat, degrees‑per‑pixel map viewport.
//!
//! This crate provides a small, headless model of the part of the globe a map
//! widget is currently showing. It focuses on:
//! - Viewport state: the geographic coordinate at the pixel origin, a uniform
//!   scale in degrees per device pixel, and the view extents in device pixels.
//! - Coordinate conversion between geographic degrees and surface pixels.
//! - Bounded pan and anchor‑preserving zoom.
//!
//! It does **not** own any geometry, surface or input handling. Callers are
//! expected to:
//! - Feed pointer deltas into [`GeoViewport::pan`] and wheel/button zooms into
//!   [`GeoViewport::set_scale_about`] from a higher layer.
//! - Use [`GeoViewport::geo_to_pixel`] (or the bulk
//!   [`GeoViewport::geo_to_pixel_transform`]) when emitting paths.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use geocanvas_view::GeoViewport;
//!
//! // 800x600 device pixels, 0.01 degrees per pixel.
//! let mut view = GeoViewport::new(Size::new(800.0, 600.0));
//! assert!(view.set_scale(0.01));
//! view.center_on(Point::new(138.0, 36.0));
//!
//! // The centered coordinate lands in the middle of the view.
//! let px = view.geo_to_pixel(Point::new(138.0, 36.0));
//! assert!((px.x - 400.0).abs() < 1e-9);
//! assert!((px.y - 300.0).abs() < 1e-9);
//!
//! // Zoom in around the pointer; the coordinate under it stays put.
//! let anchor = Point::new(120.0, 80.0);
//! let before = view.pixel_to_geo(anchor);
//! assert!(view.zoom_in_about(anchor));
//! let after = view.pixel_to_geo(anchor);
//! assert!((before - after).hypot() < 1e-9);
//! ```
//!
//! ## Design notes
//!
//! - The mapping is equirectangular: longitude maps linearly to x, latitude
//!   maps linearly to y with the sign flipped (pixel y grows downwards). This
//!   is not a map projection library.
//! - Scale requests outside `[min_scale, max_scale]` are rejected, not
//!   clamped, so `min_scale <= scale <= max_scale` holds at all times.
//! - Panning is unbounded.
//!
//! This crate is `no_std`.

#![no_std]

mod viewport;

pub use viewport::{
    DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, DEFAULT_SCALE, GeoViewport, GeoViewportDebugInfo,
    ZOOM_STEP,
};
