//! Ellipse and circle geometry.

use super::point_to_segment_dist;
use kurbo::{BezPath, Circle, Ellipse as KurboEllipse, Point, Shape as KurboShape, Vec2};

/// Radius of the circle through both anchors.
pub fn circle_radius(start: Point, end: Point) -> f64 {
    start.distance(end) / 2.0
}

fn center_and_radii(start: Point, end: Point) -> (Point, f64, f64) {
    let center = start.midpoint(end);
    let rx = (end.x - start.x).abs() / 2.0;
    let ry = (end.y - start.y).abs() / 2.0;
    (center, rx, ry)
}

/// A zero-height or zero-width ellipse collapses onto its long axis.
fn flat_axis(center: Point, rx: f64, ry: f64) -> Option<(Point, Point)> {
    if rx.min(ry) < f64::EPSILON {
        let half = Vec2::new(rx, ry);
        Some((center - half, center + half))
    } else {
        None
    }
}

/// Distance from the center to the ellipse boundary along the ray through
/// `point`. Both radii must be non-zero.
fn boundary_radius(center: Point, rx: f64, ry: f64, point: Point) -> f64 {
    let v = point - center;
    let len = v.hypot();
    if len < f64::EPSILON {
        return rx.min(ry);
    }
    let (ux, uy) = (v.x / len, v.y / len);
    rx * ry / ((ry * ux).powi(2) + (rx * uy).powi(2)).sqrt()
}

/// Circumference proximity. The anchor corners also count so a drag handle
/// is always grabbable, even on ellipses whose outline passes far from them.
pub(super) fn hit_test(start: Point, end: Point, point: Point, tolerance: f64) -> bool {
    if point.distance(start) <= tolerance || point.distance(end) <= tolerance {
        return true;
    }
    let (center, rx, ry) = center_and_radii(start, end);
    if let Some((a, b)) = flat_axis(center, rx, ry) {
        return point_to_segment_dist(point, a, b) <= tolerance;
    }
    let radius = boundary_radius(center, rx, ry, point);
    (point.distance(center) - radius).abs() <= tolerance
}

pub(super) fn contains(start: Point, end: Point, point: Point, tolerance: f64) -> bool {
    let (center, rx, ry) = center_and_radii(start, end);
    if let Some((a, b)) = flat_axis(center, rx, ry) {
        return point_to_segment_dist(point, a, b) <= tolerance;
    }
    point.distance(center) <= boundary_radius(center, rx, ry, point) + tolerance
}

pub(super) fn circle_hit_test(start: Point, end: Point, point: Point, tolerance: f64) -> bool {
    let center = start.midpoint(end);
    (point.distance(center) - circle_radius(start, end)).abs() <= tolerance
}

pub(super) fn circle_contains(start: Point, end: Point, point: Point, tolerance: f64) -> bool {
    point.distance(start.midpoint(end)) <= circle_radius(start, end) + tolerance
}

pub(super) fn to_path(start: Point, end: Point) -> BezPath {
    let (center, rx, ry) = center_and_radii(start, end);
    KurboEllipse::new(center, (rx, ry), 0.0).to_path(0.1)
}

pub(super) fn circle_path(start: Point, end: Point) -> BezPath {
    Circle::new(start.midpoint(end), circle_radius(start, end)).to_path(0.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 5.0;

    #[test]
    fn test_circle_circumference() {
        // Center (50, 50), radius 50
        let (a, b) = (Point::new(0.0, 50.0), Point::new(100.0, 50.0));
        assert!(circle_hit_test(a, b, Point::new(50.0, 0.0), TOL));
        assert!(circle_hit_test(a, b, Point::new(50.0, 103.0), TOL));
        assert!(!circle_hit_test(a, b, Point::new(50.0, 50.0), TOL));
        assert!(!circle_hit_test(a, b, Point::new(50.0, 110.0), TOL));
    }

    #[test]
    fn test_circle_anchors_lie_on_circumference() {
        let (a, b) = (Point::new(10.0, 20.0), Point::new(70.0, 100.0));
        assert!(circle_hit_test(a, b, a, TOL));
        assert!(circle_hit_test(a, b, b, TOL));
    }

    #[test]
    fn test_ellipse_circumference() {
        // Center (50, 25), rx 50, ry 25
        let (a, b) = (Point::new(0.0, 0.0), Point::new(100.0, 50.0));
        assert!(hit_test(a, b, Point::new(100.0, 25.0), TOL));
        assert!(hit_test(a, b, Point::new(50.0, 0.0), TOL));
        assert!(hit_test(a, b, Point::new(50.0, 52.0), TOL));
        assert!(!hit_test(a, b, Point::new(50.0, 25.0), TOL));
        assert!(!hit_test(a, b, Point::new(75.0, 25.0), TOL));
    }

    #[test]
    fn test_ellipse_anchor_corners() {
        let (a, b) = (Point::new(0.0, 0.0), Point::new(100.0, 50.0));
        assert!(hit_test(a, b, a, TOL));
        assert!(hit_test(a, b, b, TOL));
        // The other two corners are neither anchors nor near the outline
        assert!(!hit_test(a, b, Point::new(100.0, 0.0), TOL));
    }

    #[test]
    fn test_ellipse_contains_interior() {
        let (a, b) = (Point::new(0.0, 0.0), Point::new(100.0, 50.0));
        assert!(contains(a, b, Point::new(50.0, 25.0), TOL));
        assert!(contains(a, b, Point::new(80.0, 30.0), TOL));
        assert!(!contains(a, b, Point::new(100.0, 0.0), TOL));
    }

    #[test]
    fn test_flat_ellipse() {
        let (a, b) = (Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(hit_test(a, b, Point::new(100.0, 0.0), TOL));
        assert!(hit_test(a, b, Point::new(20.0, 0.0), TOL));
        assert!(hit_test(a, b, Point::new(20.0, 3.0), TOL));
        assert!(!hit_test(a, b, Point::new(120.0, 0.0), TOL));
    }
}
