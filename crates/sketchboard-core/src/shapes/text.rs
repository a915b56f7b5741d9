//! Text block geometry.
//!
//! Bounds are approximated from line count and the longest line's character
//! count rather than measured glyph metrics, so hit testing works without a
//! font system.

use kurbo::{Point, Rect};

/// Font size used when painting text.
pub const TEXT_FONT_SIZE: f64 = 16.0;

/// Vertical distance between consecutive lines.
pub const TEXT_LINE_HEIGHT: f64 = 20.0;

/// Average glyph advance used for the approximate width.
pub const TEXT_CHAR_WIDTH: f64 = 8.0;

/// Approximate bounding box of a text block anchored at its top-left corner.
pub fn text_bounds(anchor: Point, content: &str) -> Rect {
    let lines = content.split('\n');
    let (count, longest) = lines.fold((0usize, 0usize), |(count, longest), line| {
        (count + 1, longest.max(line.chars().count()))
    });
    Rect::new(
        anchor.x,
        anchor.y,
        anchor.x + longest as f64 * TEXT_CHAR_WIDTH,
        anchor.y + count.max(1) as f64 * TEXT_LINE_HEIGHT,
    )
}

pub(super) fn hit_test(anchor: Point, content: &str, point: Point, tolerance: f64) -> bool {
    let rect = text_bounds(anchor, content).inflate(tolerance, tolerance);
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}
