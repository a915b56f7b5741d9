//! Arrow geometry (segment with an open two-stroke head).

use super::point_to_segment_dist;
use kurbo::{BezPath, Point, Rect, Vec2};
use std::f64::consts::FRAC_PI_6;

/// Length of each arrowhead stroke.
pub const ARROW_HEAD_LENGTH: f64 = 20.0;

/// Half-angle between the shaft and each arrowhead stroke (30°).
pub const ARROW_HEAD_ANGLE: f64 = FRAC_PI_6;

/// The two outer points of the arrowhead, oriented along start→end.
///
/// A zero-length arrow points along +x.
pub fn arrow_head(start: Point, end: Point) -> (Point, Point) {
    let dir = end - start;
    let angle = dir.y.atan2(dir.x);
    let left = end - Vec2::from_angle(angle - ARROW_HEAD_ANGLE) * ARROW_HEAD_LENGTH;
    let right = end - Vec2::from_angle(angle + ARROW_HEAD_ANGLE) * ARROW_HEAD_LENGTH;
    (left, right)
}

pub(super) fn hit_test(
    start: Point,
    end: Point,
    point: Point,
    tolerance: f64,
    tip_radius: f64,
) -> bool {
    point_to_segment_dist(point, start, end) <= tolerance || point.distance(end) <= tip_radius
}

pub(super) fn bounds(start: Point, end: Point) -> Rect {
    let (left, right) = arrow_head(start, end);
    Rect::from_points(start, end)
        .union_pt(left)
        .union_pt(right)
}

pub(super) fn to_path(start: Point, end: Point) -> BezPath {
    let (left, right) = arrow_head(start, end);
    let mut path = BezPath::new();
    path.move_to(start);
    path.line_to(end);
    path.move_to(end);
    path.line_to(left);
    path.move_to(end);
    path.line_to(right);
    path
}
