//! Rectangle geometry.

use kurbo::{BezPath, Point, Rect, RoundedRect, Shape as KurboShape};

/// The axis-aligned box spanned by the anchors, in any anchor order.
pub(super) fn as_rect(start: Point, end: Point) -> Rect {
    Rect::from_points(start, end)
}

/// Border-only hit: inside the box grown by `tolerance` but not inside the
/// box shrunk by it.
pub(super) fn hit_test(start: Point, end: Point, point: Point, tolerance: f64) -> bool {
    let rect = as_rect(start, end);
    let outer = rect.inflate(tolerance, tolerance);
    let inner = rect.inflate(-tolerance, -tolerance);
    contains_closed(outer, point) && !contains_open(inner, point)
}

/// Interior-or-border hit, used by the eraser.
pub(super) fn contains(start: Point, end: Point, point: Point, tolerance: f64) -> bool {
    contains_closed(as_rect(start, end).inflate(tolerance, tolerance), point)
}

pub(super) fn to_path(start: Point, end: Point, corner_radius: f64) -> BezPath {
    let rect = as_rect(start, end);
    if corner_radius > 0.0 {
        // Clamp so tiny boxes don't produce self-intersecting arcs
        let radius = corner_radius.min(rect.width() / 2.0).min(rect.height() / 2.0);
        RoundedRect::from_rect(rect, radius).to_path(0.1)
    } else {
        rect.to_path(0.1)
    }
}

fn contains_closed(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

fn contains_open(rect: Rect, point: Point) -> bool {
    point.x > rect.x0 && point.x < rect.x1 && point.y > rect.y0 && point.y < rect.y1
}
