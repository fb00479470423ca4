// Copyright 2025 the GeoCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer interaction scenarios driven against a recording surface.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use geocanvas::gesture::GesturePhase;
use geocanvas::{
    ConfigError, GeoCanvas, GeoCanvasConfig, Geometry, PointerEvent, PointerEventKind, Repaint,
};
use geocanvas_surface::{RecordingSurface, SurfaceOp};
use kurbo::{Point, Size, Vec2};
use serde_json::json;

/// A 100×100 map centered on (0, 0) at one degree per pixel, so pixel
/// `(x, y)` shows lon/lat `(x - 50, 50 - y)`.
fn map_with(toggles: serde_json::Value, dpr: f64) -> GeoCanvas<RecordingSurface> {
    let mut config = json!({
        "center": [0, 0],
        "scale": 1.0,
        "minScale": 0.25,
        "maxScale": 4.0
    });
    if let (Some(config), Some(toggles)) = (config.as_object_mut(), toggles.as_object()) {
        config.extend(toggles.clone());
    }
    let config = GeoCanvasConfig::from_json_str(&config.to_string()).expect("valid config");
    let size = Size::new(100.0 * dpr, 100.0 * dpr);
    GeoCanvas::new(RecordingSurface::new(size, dpr), &config).expect("valid config")
}

fn map(toggles: serde_json::Value) -> GeoCanvas<RecordingSurface> {
    map_with(toggles, 1.0)
}

fn count_updates(map: &mut GeoCanvas<RecordingSurface>) -> Rc<Cell<u32>> {
    let updates = Rc::new(Cell::new(0));
    let counter = updates.clone();
    map.on_update(move |_| counter.set(counter.get() + 1));
    updates
}

fn record_clicks(map: &mut GeoCanvas<RecordingSurface>) -> Rc<RefCell<Vec<Option<Point>>>> {
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let log = clicks.clone();
    map.on_click_state_changed(move |pos| {
        log.borrow_mut().push(pos);
        Repaint::Skip
    });
    clicks
}

fn count_ops(map: &GeoCanvas<RecordingSurface>, pred: impl Fn(&SurfaceOp) -> bool) -> usize {
    map.surface().count(pred)
}

fn is_capture(op: &SurfaceOp) -> bool {
    matches!(op, SurfaceOp::Capture { .. })
}

fn is_blit(op: &SurfaceOp) -> bool {
    matches!(op, SurfaceOp::Blit { .. })
}

fn drag(map: &mut GeoCanvas<RecordingSurface>, path: &[Point]) {
    let (first, rest) = path.split_first().expect("non-empty path");
    map.handle_event(&PointerEvent::down(*first));
    for &p in rest {
        map.handle_event(&PointerEvent::move_to(p));
    }
    if let Some(&last) = path.last() {
        map.handle_event(&PointerEvent::up(last));
    }
}

#[test]
fn drag_blits_per_move_and_redraws_once_on_release() {
    let mut map = map(json!({"draggable": true}));
    let updates = count_updates(&mut map);
    let progress = Rc::new(RefCell::new(Vec::new()));
    let log = progress.clone();
    map.on_drag_progress(move |offset| log.borrow_mut().push(offset));
    assert_eq!(map.viewport().origin(), Point::new(-50.0, 50.0));

    assert!(map.handle_event(&PointerEvent::down(Point::new(0.0, 0.0))));
    assert_eq!(map.phase(), GesturePhase::Armed);
    assert!(map.handle_event(&PointerEvent::move_to(Point::new(10.0, 5.0))));
    assert_eq!(map.phase(), GesturePhase::Dragging);
    assert!(map.handle_event(&PointerEvent::move_to(Point::new(30.0, 10.0))));

    // The drag frame is a clear plus a blit of the press-time snapshot.
    let [SurfaceOp::Clear(_), SurfaceOp::Blit { snapshot: 0, offset }] =
        map.surface().frame_ops()
    else {
        panic!("unexpected drag frame: {:?}", map.surface().frame_ops());
    };
    assert_eq!(*offset, Vec2::new(20.0, 5.0));
    assert_eq!(updates.get(), 0);
    assert_eq!(progress.borrow().as_slice(), &[Vec2::new(20.0, 5.0)]);

    assert!(map.handle_event(&PointerEvent::up(Point::new(30.0, 10.0))));
    assert_eq!(map.phase(), GesturePhase::Idle);
    assert_eq!(updates.get(), 1);
    assert_eq!(map.viewport().origin(), Point::new(-70.0, 55.0));
    assert_eq!(count_ops(&map, is_capture), 1);
    assert_eq!(count_ops(&map, is_blit), 1);
}

#[test]
fn press_and_release_is_a_click_but_a_drag_release_is_not() {
    let mut map = map(json!({"draggable": true, "clickable": true}));
    let clicks = record_clicks(&mut map);

    drag(&mut map, &[Point::new(10.0, 10.0)]);
    assert_eq!(clicks.borrow().as_slice(), &[Some(Point::new(10.0, 10.0))]);
    assert_eq!(map.click_position(), Some(Point::new(10.0, 10.0)));

    drag(
        &mut map,
        &[Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(6.0, 6.0)],
    );
    assert_eq!(clicks.borrow().len(), 1);
    assert_eq!(map.click_position(), Some(Point::new(10.0, 10.0)));
    assert_eq!(map.viewport().origin(), Point::new(-51.0, 51.0));
}

#[test]
fn clicks_are_latched_in_device_pixels() {
    let mut map = map_with(json!({"clickable": true}), 2.0);
    drag(&mut map, &[Point::new(10.0, 20.0)]);
    assert_eq!(map.click_position(), Some(Point::new(20.0, 40.0)));
}

#[test]
fn click_callback_repaint_requests_one_redraw() {
    let mut map = map(json!({"clickable": true}));
    let updates = count_updates(&mut map);
    map.on_click_state_changed(|_| Repaint::Full);
    drag(&mut map, &[Point::new(1.0, 1.0)]);
    assert_eq!(updates.get(), 1);
    drag(&mut map, &[Point::new(1.0, 1.0)]);
    assert_eq!(updates.get(), 2);
}

#[test]
fn clicked_geometry_is_visible_to_update() {
    let mut map = map(json!({"clickable": true}));
    // Covers lon/lat [0, 10] × [0, 10], pixels x 50..60, y 40..50.
    let square: Geometry = serde_json::from_value(json!({
        "type": "Polygon",
        "coordinates": [[[0, 0], [0, 10], [10, 10], [10, 0], [0, 0]]]
    }))
    .expect("valid polygon");
    let hits = Rc::new(RefCell::new(Vec::new()));
    let log = hits.clone();
    let drawn = square.clone();
    map.on_update(move |frame| {
        let style = frame.default_style();
        frame.draw_geometry(&drawn, &style);
        log.borrow_mut().push(frame.is_geometry_clicked(&drawn));
    });
    map.on_click_state_changed(|_| Repaint::Full);

    drag(&mut map, &[Point::new(55.0, 45.0)]);
    drag(&mut map, &[Point::new(5.0, 5.0)]);
    assert_eq!(hits.borrow().as_slice(), &[true, false]);
    assert!(!map.is_geometry_clicked(&square));
    assert_eq!(
        map.surface()
            .count(|op| matches!(op, SurfaceOp::Stroke { .. })),
        2
    );
}

#[test]
fn wheel_zooms_about_the_pointer() {
    let mut map = map(json!({"draggable": true}));
    let updates = count_updates(&mut map);
    let anchor = Point::new(30.0, 40.0);
    let geo = map.viewport().pixel_to_geo(anchor);

    assert!(map.handle_event(&PointerEvent::wheel(anchor, -120.0)));
    assert_eq!(map.viewport().scale(), 0.5);
    assert!((map.viewport().geo_to_pixel(geo) - anchor).hypot() < 1e-9);
    assert_eq!(updates.get(), 1);

    assert!(map.handle_event(&PointerEvent::wheel(anchor, 3.0)));
    assert_eq!(map.viewport().scale(), 1.0);
    assert!((map.viewport().geo_to_pixel(geo) - anchor).hypot() < 1e-9);

    assert!(!map.handle_event(&PointerEvent::wheel(anchor, 0.0)));
    assert_eq!(updates.get(), 2);
}

#[test]
fn wheel_is_ignored_mid_gesture_and_when_not_draggable() {
    let mut map = map(json!({"draggable": true}));
    map.handle_event(&PointerEvent::down(Point::new(0.0, 0.0)));
    assert!(!map.handle_event(&PointerEvent::wheel(Point::ZERO, -1.0)));
    assert_eq!(map.viewport().scale(), 1.0);

    let mut fixed = self::map(json!({"clickable": true}));
    assert!(!fixed.handle_event(&PointerEvent::wheel(Point::ZERO, -1.0)));
    assert_eq!(fixed.viewport().scale(), 1.0);
}

#[test]
fn out_of_range_scales_are_rejected_without_redraw() {
    let mut map = map(json!({}));
    let updates = count_updates(&mut map);
    let origin = map.viewport().origin();

    assert!(!map.set_scale(8.0));
    assert!(!map.set_scale(0.1));
    assert_eq!(map.viewport().scale(), 1.0);
    assert_eq!(map.viewport().origin(), origin);
    assert_eq!(updates.get(), 0);

    assert!(map.zoom_out());
    assert!(map.zoom_out());
    assert!(!map.zoom_out());
    assert_eq!(map.viewport().scale(), 4.0);
    assert_eq!(updates.get(), 2);
}

#[test]
fn button_zoom_keeps_the_center() {
    let mut map = map(json!({}));
    let center = map.viewport().center();
    assert!(map.zoom_in());
    assert!(map.zoom_in());
    assert_eq!(map.viewport().scale(), 0.25);
    assert!((map.viewport().center() - center).hypot() < 1e-9);
    assert!(!map.zoom_in());
}

#[test]
fn scale_changes_clear_latches() {
    let mut map = map(json!({"clickable": true, "hoverable": true}));
    let clicks = record_clicks(&mut map);
    let hovers = Rc::new(RefCell::new(Vec::new()));
    let log = hovers.clone();
    map.on_hover_state_changed(move |pos| {
        log.borrow_mut().push(pos);
        Repaint::Skip
    });

    map.handle_event(&PointerEvent::move_to(Point::new(3.0, 4.0)));
    drag(&mut map, &[Point::new(10.0, 10.0)]);
    assert!(map.zoom_in());

    assert_eq!(map.click_position(), None);
    assert_eq!(map.hover_position(), None);
    assert_eq!(
        clicks.borrow().as_slice(),
        &[Some(Point::new(10.0, 10.0)), None]
    );
    assert_eq!(
        hovers.borrow().as_slice(),
        &[Some(Point::new(3.0, 4.0)), None]
    );

    // Nothing latched: a second zoom fires no callbacks.
    assert!(map.zoom_in());
    assert_eq!(clicks.borrow().len(), 2);
    assert_eq!(hovers.borrow().len(), 2);
}

#[test]
fn hover_follows_moves_outside_drags() {
    let mut map = map(json!({"draggable": true, "hoverable": true}));
    let hovers = Rc::new(Cell::new(0));
    let counter = hovers.clone();
    map.on_hover_state_changed(move |_| {
        counter.set(counter.get() + 1);
        Repaint::Skip
    });

    assert!(map.handle_event(&PointerEvent::move_to(Point::new(5.0, 5.0))));
    assert!(!map.handle_event(&PointerEvent::move_to(Point::new(5.0, 5.0))));
    assert_eq!(hovers.get(), 1);

    drag(
        &mut map,
        &[Point::new(5.0, 5.0), Point::new(20.0, 20.0), Point::new(40.0, 40.0)],
    );
    assert_eq!(hovers.get(), 1);
    assert_eq!(map.hover_position(), Some(Point::new(5.0, 5.0)));

    assert!(map.handle_event(&PointerEvent::leave(Point::new(100.0, 50.0))));
    assert_eq!(map.hover_position(), None);
    assert_eq!(hovers.get(), 2);
}

#[test]
fn leave_and_cancel_commit_partial_drags() {
    let mut map = map(json!({"draggable": true}));
    let updates = count_updates(&mut map);

    map.handle_event(&PointerEvent::down(Point::new(0.0, 0.0)));
    map.handle_event(&PointerEvent::move_to(Point::new(0.0, 0.0)));
    map.handle_event(&PointerEvent::move_to(Point::new(10.0, 0.0)));
    assert!(map.handle_event(&PointerEvent::leave(Point::new(25.0, 0.0))));
    assert_eq!(map.viewport().origin(), Point::new(-75.0, 50.0));
    assert_eq!(updates.get(), 1);

    map.handle_event(&PointerEvent::down(Point::new(0.0, 0.0)));
    map.handle_event(&PointerEvent::move_to(Point::new(0.0, 0.0)));
    map.handle_event(&PointerEvent::move_to(Point::new(10.0, 4.0)));
    assert!(map.handle_event(&PointerEvent::cancel(Point::new(99.0, 99.0))));
    assert_eq!(map.viewport().origin(), Point::new(-85.0, 54.0));
    assert_eq!(updates.get(), 2);
    assert_eq!(map.phase(), GesturePhase::Idle);
}

#[test]
fn click_only_maps_never_capture_or_drag() {
    let mut map = map(json!({"clickable": true}));
    let clicks = record_clicks(&mut map);
    drag(
        &mut map,
        &[Point::new(0.0, 0.0), Point::new(30.0, 30.0), Point::new(40.0, 40.0)],
    );
    assert_eq!(count_ops(&map, is_capture), 0);
    assert_eq!(map.viewport().origin(), Point::new(-50.0, 50.0));
    assert_eq!(clicks.borrow().as_slice(), &[Some(Point::new(40.0, 40.0))]);
}

#[test]
fn inert_maps_ignore_presses() {
    let mut map = map(json!({}));
    assert!(!map.handle_event(&PointerEvent::down(Point::ZERO)));
    assert_eq!(map.phase(), GesturePhase::Idle);

    map.set_draggable(true);
    assert!(map.handle_event(&PointerEvent::down(Point::ZERO)));
    assert_eq!(map.phase(), GesturePhase::Armed);
}

#[test]
fn multi_touch_presses_do_not_start_gestures() {
    let mut map = map(json!({"draggable": true}));
    let touches = [Point::new(1.0, 1.0), Point::new(50.0, 50.0)];
    assert_eq!(
        PointerEvent::from_touches(PointerEventKind::Down, &touches),
        None
    );
    let single = PointerEvent::from_touches(PointerEventKind::Down, &touches[..1])
        .expect("single touch");
    assert!(map.handle_event(&single));
    assert_eq!(map.phase(), GesturePhase::Armed);
}

#[test]
fn resize_relayouts_and_redraws_once() {
    let mut map = map(json!({}));
    let updates = count_updates(&mut map);
    let origin = map.viewport().origin();

    map.surface_mut().set_size(Size::new(300.0, 200.0));
    map.resize();
    assert_eq!(map.viewport().view_size(), Size::new(300.0, 200.0));
    assert_eq!(map.viewport().origin(), origin);
    assert_eq!(updates.get(), 1);
}

#[test]
fn position_setters_wait_for_the_next_redraw() {
    let mut map = map(json!({}));
    let updates = count_updates(&mut map);
    map.pan(Vec2::new(10.0, 0.0));
    map.center_on(Point::new(20.0, 10.0));
    assert_eq!(map.viewport().center(), Point::new(20.0, 10.0));
    assert_eq!(updates.get(), 0);
    map.update();
    assert_eq!(updates.get(), 1);
}

#[test]
fn invalid_configs_are_refused() {
    let config = GeoCanvasConfig {
        scale: 10.0,
        ..GeoCanvasConfig::default()
    };
    let surface = RecordingSurface::new(Size::new(10.0, 10.0), 1.0);
    assert!(matches!(
        GeoCanvas::new(surface, &config),
        Err(ConfigError::ScaleOutOfRange { .. })
    ));

    let mut map = map(json!({}));
    assert!(matches!(
        map.set_background_color("nope"),
        Err(ConfigError::Color(_))
    ));
    assert!(map.set_background_color("rgb(10, 20, 30)").is_ok());
    assert!(!map.set_line_width(-2.0));
}

#[test]
fn narrowing_scale_limits_clamps_like_a_scale_change() {
    let mut map = map(json!({"clickable": true}));
    let updates = count_updates(&mut map);
    let clicks = record_clicks(&mut map);
    let center = map.viewport().center();
    drag(&mut map, &[Point::new(10.0, 10.0)]);

    map.set_scale_limits(2.0, 4.0);
    assert_eq!(map.viewport().scale(), 2.0);
    assert!((map.viewport().center() - center).hypot() < 1e-9);
    assert_eq!(map.click_position(), None);
    assert_eq!(
        clicks.borrow().as_slice(),
        &[Some(Point::new(10.0, 10.0)), None]
    );
    assert_eq!(updates.get(), 1);

    // Limits that already contain the scale change nothing.
    drag(&mut map, &[Point::new(20.0, 20.0)]);
    map.set_scale_limits(0.5, 8.0);
    assert_eq!(map.viewport().scale(), 2.0);
    assert_eq!(map.click_position(), Some(Point::new(20.0, 20.0)));
    assert_eq!(updates.get(), 1);
}

#[test]
fn latch_callbacks_during_a_scale_change_share_one_redraw() {
    let mut map = map(json!({"clickable": true, "hoverable": true}));
    let updates = count_updates(&mut map);
    map.on_click_state_changed(|_| Repaint::Full);
    map.on_hover_state_changed(|_| Repaint::Full);

    map.handle_event(&PointerEvent::move_to(Point::new(3.0, 4.0)));
    drag(&mut map, &[Point::new(10.0, 10.0)]);
    assert_eq!(updates.get(), 2);

    assert!(map.zoom_in());
    assert_eq!(updates.get(), 3);
}
