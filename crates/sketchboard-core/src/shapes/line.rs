//! Line geometry.

use super::point_to_segment_dist;
use kurbo::{BezPath, Point};

pub(super) fn hit_test(start: Point, end: Point, point: Point, tolerance: f64) -> bool {
    point_to_segment_dist(point, start, end) <= tolerance
}

pub(super) fn to_path(start: Point, end: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(start);
    path.line_to(end);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test_on_line() {
        let (a, b) = (Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(hit_test(a, b, Point::new(50.0, 0.0), 1.0));
        assert!(hit_test(a, b, Point::new(50.0, 2.0), 5.0));
        assert!(!hit_test(a, b, Point::new(50.0, 20.0), 5.0));
    }

    #[test]
    fn test_hit_test_endpoints() {
        let (a, b) = (Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(hit_test(a, b, a, 1.0));
        assert!(hit_test(a, b, b, 1.0));
    }

    #[test]
    fn test_hit_test_beyond_endpoint_is_clamped() {
        let (a, b) = (Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        // Collinear but past the end: distance is to the endpoint, not the infinite line
        assert!(!hit_test(a, b, Point::new(110.0, 0.0), 5.0));
        assert!(hit_test(a, b, Point::new(104.0, 0.0), 5.0));
    }

    #[test]
    fn test_diagonal() {
        let (a, b) = (Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        assert!(hit_test(a, b, Point::new(52.0, 48.0), 5.0));
        assert!(!hit_test(a, b, Point::new(60.0, 40.0), 5.0));
    }
}
