// Copyright 2025 the GeoCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GeoCanvas: an embeddable, interactive GeoJSON map widget.
//!
//! [`GeoCanvas`] renders geometries onto any [`RenderSurface`] and turns
//! pointer input into map interaction:
//! - **Drag** pans the map. The surface is captured once when the pointer
//!   goes down; while dragging, each move only blits that snapshot at the
//!   current offset. Geometry is recomputed once, when the drag ends.
//! - **Wheel** and the zoom buttons change the scale by a factor of two,
//!   keeping the coordinate under the pointer (or the view center) fixed.
//!   Scales outside the configured bounds are ignored.
//! - **Click** and **hover** latch a pixel that [`Frame::is_geometry_clicked`]
//!   and [`Frame::is_geometry_hovered`] test geometries against. A press and
//!   release without movement is a click; the end of a drag never is.
//!
//! Mouse and touch input are normalized into [`PointerEvent`]s before they
//! reach the widget.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use geocanvas::{GeoCanvas, GeoCanvasConfig, Geometry, PointerEvent, Repaint};
//! use geocanvas_surface::RecordingSurface;
//! use kurbo::{Point, Size};
//!
//! let config = GeoCanvasConfig::from_json_str(
//!     r#"{"center": [5, 5], "scale": 0.1, "minScale": 0.01, "maxScale": 1,
//!         "draggable": true, "clickable": true}"#,
//! )
//! .unwrap();
//! let surface = RecordingSurface::new(Size::new(200.0, 200.0), 1.0);
//! let mut map = GeoCanvas::new(surface, &config).unwrap();
//!
//! let square: Geometry = serde_json::from_str(
//!     r#"{"type": "Polygon", "coordinates": [[[0, 0], [0, 10], [10, 10], [10, 0]]]}"#,
//! )
//! .unwrap();
//!
//! let selected = Rc::new(Cell::new(false));
//! let seen = selected.clone();
//! map.on_update(move |frame| {
//!     let style = frame.default_style();
//!     frame.draw_geometry(&square, &style);
//!     seen.set(frame.is_geometry_clicked(&square));
//! });
//! map.on_click_state_changed(|_| Repaint::Full);
//!
//! // Press and release in the middle of the view: a click on the square.
//! map.handle_event(&PointerEvent::down(Point::new(100.0, 100.0)));
//! map.handle_event(&PointerEvent::up(Point::new(100.0, 100.0)));
//! assert!(selected.get());
//! ```

mod canvas;
mod config;
mod event;
pub mod gesture;
mod latch;

pub use canvas::{Frame, GeoCanvas, Repaint};
pub use config::{ConfigError, FillRuleName, GeoCanvasConfig};
pub use event::{PointerEvent, PointerEventKind};
pub use latch::PixelLatch;

pub use geocanvas_geometry::{FillRule, Geometry, Polygon, UNLATCHED, is_point_in_geometry};
pub use geocanvas_surface::{Color, GeometryStyle, RenderSurface};
pub use geocanvas_view::GeoViewport;
