//! Angle snapping for line and arrow endpoints.

use kurbo::Point;

/// Angle snap increment in degrees.
pub const ANGLE_SNAP_INCREMENT: f64 = 5.0;

/// Anchors closer than this are treated as a click, not a drag.
const MIN_SNAP_DISTANCE: f64 = 0.001;

/// Result of an angle snap operation.
#[derive(Debug, Clone, Copy)]
pub struct AngleSnapResult {
    /// The snapped endpoint.
    pub point: Point,
    /// The snapped angle in degrees (0-360).
    pub angle_degrees: f64,
    /// The original (unsnapped) angle in degrees.
    pub original_angle_degrees: f64,
    /// Whether the endpoint moved.
    pub snapped: bool,
    /// Distance from start point (preserved from original).
    pub distance: f64,
}

impl AngleSnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point, start: Point) -> Self {
        let v = point - start;
        let angle = normalize_degrees(v.y.atan2(v.x).to_degrees());
        Self {
            point,
            angle_degrees: angle,
            original_angle_degrees: angle,
            snapped: false,
            distance: v.hypot(),
        }
    }
}

fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Snap an angle to the nearest increment.
/// Returns the snapped angle in degrees (0-360).
pub fn snap_angle(angle_degrees: f64, increment: f64) -> f64 {
    if increment <= 0.0 {
        return normalize_degrees(angle_degrees);
    }
    normalize_degrees((angle_degrees / increment).round() * increment)
}

/// Snap a line endpoint to angle increments from a start point.
/// This snaps the angle while preserving the distance from start.
///
/// A non-positive `increment` disables snapping.
pub fn snap_line_endpoint(start: Point, end: Point, increment: f64) -> AngleSnapResult {
    let none = AngleSnapResult::none(end, start);
    if none.distance < MIN_SNAP_DISTANCE || increment <= 0.0 {
        return none;
    }

    let snapped_angle = snap_angle(none.original_angle_degrees, increment);
    let radians = snapped_angle.to_radians();
    let point = Point::new(
        start.x + none.distance * radians.cos(),
        start.y + none.distance * radians.sin(),
    );

    AngleSnapResult {
        point,
        angle_degrees: snapped_angle,
        snapped: point != end,
        ..none
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_angle() {
        assert!((snap_angle(0.0, 5.0) - 0.0).abs() < 1e-9);
        assert!((snap_angle(2.4, 5.0) - 0.0).abs() < 1e-9);
        assert!((snap_angle(2.6, 5.0) - 5.0).abs() < 1e-9);
        assert!((snap_angle(44.0, 5.0) - 45.0).abs() < 1e-9);
        assert!((snap_angle(358.0, 5.0) - 0.0).abs() < 1e-9);
        assert!((snap_angle(-3.0, 5.0) - 355.0).abs() < 1e-9);
    }

    #[test]
    fn test_snap_line_endpoint_shallow_line() {
        let start = Point::new(0.0, 0.0);
        let result = snap_line_endpoint(start, Point::new(10.0, 1.0), ANGLE_SNAP_INCREMENT);
        let length = 101f64.sqrt();
        assert!(result.snapped);
        assert!((result.angle_degrees - 5.0).abs() < 1e-9);
        assert!((result.distance - length).abs() < 1e-9);
        assert!((result.point.x - length * 5f64.to_radians().cos()).abs() < 1e-9);
        assert!((result.point.y - length * 5f64.to_radians().sin()).abs() < 1e-9);
        assert!((result.point.x - 10.0116).abs() < 1e-3);
        assert!((result.point.y - 0.8759).abs() < 1e-3);
    }

    #[test]
    fn test_snap_within_half_increment() {
        let start = Point::new(20.0, 30.0);
        let length = 75.0;
        for base in (0..72).map(|i| i as f64 * 5.0) {
            for offset in [-2.4, -1.0, 0.0, 1.3, 2.4] {
                let raw = (base + offset).to_radians();
                let end = Point::new(start.x + length * raw.cos(), start.y + length * raw.sin());
                let result = snap_line_endpoint(start, end, ANGLE_SNAP_INCREMENT);
                let got = (result.point - start).angle().to_degrees().rem_euclid(360.0);
                let diff = (got - base).abs();
                assert!(diff < 1e-6 || (360.0 - diff) < 1e-6, "{base}+{offset} -> {got}");
                assert!((start.distance(result.point) - length).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_snap_already_aligned() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(0.0, 40.0);
        let result = snap_line_endpoint(start, end, ANGLE_SNAP_INCREMENT);
        assert!((result.point.x - end.x).abs() < 1e-9);
        assert!((result.point.y - end.y).abs() < 1e-9);
        assert!((result.angle_degrees - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_snap_zero_length() {
        let p = Point::new(5.0, 5.0);
        let result = snap_line_endpoint(p, p, ANGLE_SNAP_INCREMENT);
        assert_eq!(result.point, p);
        assert!(!result.snapped);
    }

    #[test]
    fn test_snap_disabled() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(10.0, 1.0);
        let result = snap_line_endpoint(start, end, 0.0);
        assert_eq!(result.point, end);
        assert!(!result.snapped);
    }
}
