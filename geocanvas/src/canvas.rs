// Copyright 2025 the GeoCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The map widget: viewport, gesture and latches driven by pointer input.

use core::fmt;

use geocanvas_geometry::{FillRule, Geometry, is_point_in_geometry};
use geocanvas_surface::{GeometryStyle, RenderSurface, draw_geometry};
use geocanvas_view::{GeoViewport, ZOOM_STEP};
use kurbo::{Point, Vec2};
use peniko::Color;

use crate::config::{ConfigError, GeoCanvasConfig, parse_css_color};
use crate::event::{PointerEvent, PointerEventKind};
use crate::gesture::{DragEnd, DragGesture, DragMove, GesturePhase};
use crate::latch::PixelLatch;

/// Whether a latch callback wants the map redrawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Repaint {
    /// Leave the surface as it is.
    #[default]
    Skip,
    /// Redraw everything once the current event has been handled.
    Full,
}

type UpdateFn<S> = Box<dyn FnMut(&mut Frame<'_, S>)>;
type DragProgressFn = Box<dyn FnMut(Vec2)>;
type LatchFn = Box<dyn FnMut(Option<Point>) -> Repaint>;

struct Callbacks<S: RenderSurface> {
    update: UpdateFn<S>,
    drag_progress: DragProgressFn,
    click: LatchFn,
    hover: LatchFn,
}

impl<S: RenderSurface> Default for Callbacks<S> {
    fn default() -> Self {
        Self {
            update: Box::new(|_: &mut Frame<'_, S>| {}),
            drag_progress: Box::new(|_| {}),
            click: Box::new(|_| Repaint::Skip),
            hover: Box::new(|_| Repaint::Skip),
        }
    }
}

/// An interactive map drawn onto a [`RenderSurface`].
///
/// The widget owns its surface, a [`GeoViewport`] sized to the surface, the
/// current pointer gesture and the click and hover latches. Geometry is not
/// stored: the embedder draws it from the [`GeoCanvas::on_update`] callback
/// each time the map is redrawn.
///
/// Positions handed to [`GeoCanvas::handle_event`] are logical pixels; every
/// other pixel quantity (viewport, latches, drag offsets) is in device pixels.
pub struct GeoCanvas<S: RenderSurface> {
    surface: S,
    viewport: GeoViewport,
    background: Color,
    line_width: f64,
    fill_rule: FillRule,
    draggable: bool,
    clickable: bool,
    hoverable: bool,
    gesture: DragGesture<S::Snapshot>,
    click: PixelLatch,
    hover: PixelLatch,
    callbacks: Callbacks<S>,
}

impl<S: RenderSurface> fmt::Debug for GeoCanvas<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoCanvas")
            .field("viewport", &self.viewport)
            .field("background", &self.background)
            .field("line_width", &self.line_width)
            .field("fill_rule", &self.fill_rule)
            .field("draggable", &self.draggable)
            .field("clickable", &self.clickable)
            .field("hoverable", &self.hoverable)
            .field("phase", &self.gesture.phase())
            .field("click", &self.click)
            .field("hover", &self.hover)
            .finish_non_exhaustive()
    }
}

impl<S: RenderSurface> GeoCanvas<S> {
    /// Creates a widget over `surface`, centered and scaled per `config`.
    ///
    /// Nothing is drawn until the first [`GeoCanvas::update`].
    pub fn new(surface: S, config: &GeoCanvasConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut viewport = GeoViewport::new(surface.size());
        viewport.set_scale_limits(config.min_scale, config.max_scale);
        viewport.set_scale(config.scale);
        viewport.center_on(config.center_point());
        Ok(Self {
            surface,
            viewport,
            background: config.background()?,
            line_width: config.line_width,
            fill_rule: config.fill_rule.into(),
            draggable: config.draggable,
            clickable: config.clickable,
            hoverable: config.hoverable,
            gesture: DragGesture::default(),
            click: PixelLatch::default(),
            hover: PixelLatch::default(),
            callbacks: Callbacks::default(),
        })
    }

    /// Sets the callback that draws the map during [`GeoCanvas::update`].
    pub fn on_update(&mut self, f: impl FnMut(&mut Frame<'_, S>) + 'static) {
        self.callbacks.update = Box::new(f);
    }

    /// Sets the callback run after each drag frame with the offset in device
    /// pixels from the drag start.
    pub fn on_drag_progress(&mut self, f: impl FnMut(Vec2) + 'static) {
        self.callbacks.drag_progress = Box::new(f);
    }

    /// Sets the callback run on every click and when the click latch is
    /// cleared by a scale change.
    pub fn on_click_state_changed(&mut self, f: impl FnMut(Option<Point>) -> Repaint + 'static) {
        self.callbacks.click = Box::new(f);
    }

    /// Sets the callback run when the hover latch changes.
    pub fn on_hover_state_changed(&mut self, f: impl FnMut(Option<Point>) -> Repaint + 'static) {
        self.callbacks.hover = Box::new(f);
    }

    /// Feeds one pointer event to the widget.
    ///
    /// Returns `true` if the event was consumed. Full redraws requested while
    /// handling the event run once, at the end.
    pub fn handle_event(&mut self, event: &PointerEvent) -> bool {
        let position = event.device_position(self.surface.device_pixel_ratio());
        let mut repaint = Repaint::Skip;
        let handled = match event.kind {
            PointerEventKind::Down => self.pointer_down(),
            PointerEventKind::Move => self.pointer_move(position, &mut repaint),
            PointerEventKind::Up => self.pointer_up(position, &mut repaint),
            PointerEventKind::Leave => self.pointer_leave(position, &mut repaint),
            PointerEventKind::Cancel => match self.gesture.cancel() {
                DragEnd::Commit(offset) => self.commit(offset, &mut repaint),
                DragEnd::Click | DragEnd::None => false,
            },
            PointerEventKind::Wheel { delta_y } => self.wheel(position, delta_y, &mut repaint),
        };
        if repaint == Repaint::Full {
            self.update();
        }
        handled
    }

    fn pointer_down(&mut self) -> bool {
        if !(self.draggable || self.clickable) || self.gesture.phase() != GesturePhase::Idle {
            return false;
        }
        let snapshot = self.draggable.then(|| self.surface.capture());
        self.gesture.arm(snapshot)
    }

    fn pointer_move(&mut self, position: Point, repaint: &mut Repaint) -> bool {
        match self.gesture.update(position) {
            DragMove::Started => {
                log::debug!("drag started at {position:?}");
                true
            }
            DragMove::Moved { offset, snapshot } => {
                log::trace!("drag frame at offset {offset:?}");
                self.surface.clear(self.background);
                self.surface.draw_snapshot(snapshot, offset);
                (self.callbacks.drag_progress)(offset);
                true
            }
            DragMove::Ignored => {
                if !self.hoverable || !self.hover.set(position) {
                    return false;
                }
                log::trace!("hover latched at {position:?}");
                *repaint = (*repaint).max((self.callbacks.hover)(Some(position)));
                true
            }
        }
    }

    fn pointer_up(&mut self, position: Point, repaint: &mut Repaint) -> bool {
        match self.gesture.release(position) {
            DragEnd::Commit(offset) => self.commit(offset, repaint),
            DragEnd::Click => {
                if !self.clickable {
                    return false;
                }
                self.click.set(position);
                log::debug!("click latched at {position:?}");
                *repaint = (*repaint).max((self.callbacks.click)(Some(position)));
                true
            }
            DragEnd::None => false,
        }
    }

    fn pointer_leave(&mut self, position: Point, repaint: &mut Repaint) -> bool {
        if let DragEnd::Commit(offset) = self.gesture.leave(position) {
            return self.commit(offset, repaint);
        }
        if !self.hover.clear() {
            return false;
        }
        log::trace!("hover cleared");
        *repaint = (*repaint).max((self.callbacks.hover)(None));
        true
    }

    fn wheel(&mut self, position: Point, delta_y: f64, repaint: &mut Repaint) -> bool {
        if !self.draggable || self.gesture.phase() != GesturePhase::Idle {
            return false;
        }
        let scale = if delta_y > 0.0 {
            self.viewport.scale() * ZOOM_STEP
        } else if delta_y < 0.0 {
            self.viewport.scale() / ZOOM_STEP
        } else {
            return false;
        };
        self.change_scale(scale, position, repaint)
    }

    fn commit(&mut self, offset: Vec2, repaint: &mut Repaint) -> bool {
        log::debug!("drag committed with offset {offset:?}");
        self.viewport.pan(offset);
        *repaint = Repaint::Full;
        true
    }

    fn change_scale(&mut self, scale: f64, anchor: Point, repaint: &mut Repaint) -> bool {
        if !self.viewport.set_scale_about(scale, anchor) {
            log::debug!(
                "rejected scale {scale} outside [{}, {}]",
                self.viewport.min_scale(),
                self.viewport.max_scale()
            );
            return false;
        }
        log::debug!("scale changed to {scale} about {anchor:?}");
        self.scale_changed(repaint);
        true
    }

    /// Clears both latches after the pixel mapping changed and requests a
    /// full redraw.
    fn scale_changed(&mut self, repaint: &mut Repaint) {
        if self.click.clear() {
            *repaint = (*repaint).max((self.callbacks.click)(None));
        }
        if self.hover.clear() {
            *repaint = (*repaint).max((self.callbacks.hover)(None));
        }
        *repaint = Repaint::Full;
    }

    /// Clears the surface to the background and runs the update callback.
    pub fn update(&mut self) {
        self.surface.clear(self.background);
        let mut frame = Frame {
            surface: &mut self.surface,
            viewport: &self.viewport,
            click: self.click,
            hover: self.hover,
            line_width: self.line_width,
            fill_rule: self.fill_rule,
        };
        (self.callbacks.update)(&mut frame);
    }

    /// Picks up a new surface size and redraws.
    pub fn resize(&mut self) {
        self.viewport.set_view_size(self.surface.size());
        self.update();
    }

    /// Sets the scale about the view center.
    ///
    /// Returns `false` and changes nothing if `scale` is out of bounds.
    /// Otherwise both latches are cleared and the map is redrawn.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        let anchor = self.view_center_px();
        self.set_scale_about(scale, anchor)
    }

    /// Sets the scale keeping the coordinate under the device pixel `anchor`
    /// fixed. See [`GeoCanvas::set_scale`].
    pub fn set_scale_about(&mut self, scale: f64, anchor: Point) -> bool {
        let mut repaint = Repaint::Skip;
        if !self.change_scale(scale, anchor, &mut repaint) {
            return false;
        }
        if repaint == Repaint::Full {
            self.update();
        }
        true
    }

    /// Zooms in one step about the view center.
    pub fn zoom_in(&mut self) -> bool {
        self.set_scale(self.viewport.scale() / ZOOM_STEP)
    }

    /// Zooms out one step about the view center.
    pub fn zoom_out(&mut self) -> bool {
        self.set_scale(self.viewport.scale() * ZOOM_STEP)
    }

    /// Changes the scale bounds, clamping the current scale into them.
    ///
    /// Clamping is a scale change about the view center: both latches are
    /// cleared and the map is redrawn.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        let before = self.viewport.scale();
        self.viewport.set_scale_limits(min_scale, max_scale);
        let after = self.viewport.scale();
        if after == before {
            return;
        }
        log::debug!("scale clamped from {before} to {after} by new limits");
        let mut repaint = Repaint::Skip;
        self.scale_changed(&mut repaint);
        if repaint == Repaint::Full {
            self.update();
        }
    }

    /// Pans by a delta in device pixels. Takes effect on the next redraw.
    pub fn pan(&mut self, delta: Vec2) {
        self.viewport.pan(delta);
    }

    /// Centers the view on `geo`. Takes effect on the next redraw.
    pub fn center_on(&mut self, geo: Point) {
        self.viewport.center_on(geo);
    }

    /// Puts `geo` at the top-left pixel. Takes effect on the next redraw.
    pub fn set_origin(&mut self, geo: Point) {
        self.viewport.set_origin(geo);
    }

    /// Enables or disables drag-to-pan and wheel zoom.
    pub fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
    }

    /// Enables or disables click latching.
    pub fn set_clickable(&mut self, clickable: bool) {
        self.clickable = clickable;
    }

    /// Enables or disables hover latching.
    pub fn set_hoverable(&mut self, hoverable: bool) {
        self.hoverable = hoverable;
    }

    /// Sets the background from a CSS color string.
    pub fn set_background_color(&mut self, css: &str) -> Result<(), ConfigError> {
        self.background = parse_css_color(css)?;
        Ok(())
    }

    /// Sets the default line width in logical pixels.
    ///
    /// Negative or non-finite widths are ignored and return `false`.
    pub fn set_line_width(&mut self, line_width: f64) -> bool {
        if !line_width.is_finite() || line_width < 0.0 {
            return false;
        }
        self.line_width = line_width;
        true
    }

    /// Sets the fill rule used for polygon fills and hit tests.
    pub fn set_fill_rule(&mut self, fill_rule: FillRule) {
        self.fill_rule = fill_rule;
    }

    /// Returns the viewport.
    #[must_use]
    pub fn viewport(&self) -> &GeoViewport {
        &self.viewport
    }

    /// Returns the surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Returns the surface mutably, for embedders that resize it.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Captures the current surface contents.
    pub fn snapshot(&mut self) -> S::Snapshot {
        self.surface.capture()
    }

    /// Returns the phase of the current pointer gesture.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    /// Returns the latched click pixel.
    #[must_use]
    pub fn click_position(&self) -> Option<Point> {
        self.click.get()
    }

    /// Returns the latched hover pixel.
    #[must_use]
    pub fn hover_position(&self) -> Option<Point> {
        self.hover.get()
    }

    /// Returns `true` if the last click fell inside `geometry`.
    #[must_use]
    pub fn is_geometry_clicked(&self, geometry: &Geometry) -> bool {
        is_point_in_geometry(geometry, &self.viewport, self.click.position(), self.fill_rule)
    }

    /// Returns `true` if the hover position lies inside `geometry`.
    #[must_use]
    pub fn is_geometry_hovered(&self, geometry: &Geometry) -> bool {
        is_point_in_geometry(geometry, &self.viewport, self.hover.position(), self.fill_rule)
    }

    fn view_center_px(&self) -> Point {
        let size = self.viewport.view_size();
        Point::new(size.width / 2.0, size.height / 2.0)
    }
}

/// Drawing context handed to the update callback.
pub struct Frame<'a, S: RenderSurface> {
    surface: &'a mut S,
    viewport: &'a GeoViewport,
    click: PixelLatch,
    hover: PixelLatch,
    line_width: f64,
    fill_rule: FillRule,
}

impl<S: RenderSurface> fmt::Debug for Frame<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("viewport", self.viewport)
            .field("click", &self.click)
            .field("hover", &self.hover)
            .field("line_width", &self.line_width)
            .field("fill_rule", &self.fill_rule)
            .finish_non_exhaustive()
    }
}

impl<S: RenderSurface> Frame<'_, S> {
    /// Returns the surface, for drawing beyond [`Frame::draw_geometry`].
    pub fn surface(&mut self) -> &mut S {
        &mut *self.surface
    }

    /// Returns the viewport.
    #[must_use]
    pub fn viewport(&self) -> &GeoViewport {
        self.viewport
    }

    /// Returns the widget's fill rule.
    #[must_use]
    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    /// A black outline at the widget's default line width.
    #[must_use]
    pub fn default_style(&self) -> GeometryStyle {
        GeometryStyle::stroked(self.line_width, Color::BLACK)
    }

    /// Draws `geometry` with the widget's fill rule.
    pub fn draw_geometry(&mut self, geometry: &Geometry, style: &GeometryStyle) {
        draw_geometry(&mut *self.surface, self.viewport, geometry, style, self.fill_rule);
    }

    /// Returns `true` if the last click fell inside `geometry`.
    #[must_use]
    pub fn is_geometry_clicked(&self, geometry: &Geometry) -> bool {
        is_point_in_geometry(geometry, self.viewport, self.click.position(), self.fill_rule)
    }

    /// Returns `true` if the hover position lies inside `geometry`.
    #[must_use]
    pub fn is_geometry_hovered(&self, geometry: &Geometry) -> bool {
        is_point_in_geometry(geometry, self.viewport, self.hover.position(), self.fill_rule)
    }

    /// Returns the latched click pixel.
    #[must_use]
    pub fn click_position(&self) -> Option<Point> {
        self.click.get()
    }

    /// Returns the latched hover pixel.
    #[must_use]
    pub fn hover_position(&self) -> Option<Point> {
        self.hover.get()
    }
}
