//! Hit testing across a list of shapes.

use crate::shapes::{Shape, ShapeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pixel thresholds used by hit tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HitTolerance {
    /// Distance to an outline that still counts as a hit.
    pub stroke: f64,
    /// Padding around a text block's approximate box.
    pub text: f64,
    /// Radius around an arrow's end anchor.
    pub arrow_tip: f64,
}

impl Default for HitTolerance {
    fn default() -> Self {
        Self {
            stroke: 5.0,
            text: 10.0,
            arrow_tip: 15.0,
        }
    }
}

/// Topmost shape whose outline is within tolerance of `point`.
pub fn find_shape_at_point<'a>(
    point: Point,
    shapes: &'a [Shape],
    tolerance: &HitTolerance,
) -> Option<&'a Shape> {
    shapes.iter().rev().find(|s| s.hit_test(point, tolerance))
}

/// Ids of every shape the eraser touches at `point`, bottom to top.
pub fn colliding_shapes(point: Point, shapes: &[Shape], tolerance: &HitTolerance) -> Vec<ShapeId> {
    shapes
        .iter()
        .filter(|s| s.collides(point, tolerance))
        .map(|s| s.id().clone())
        .collect()
}
