//! Stateless full-repaint drawing engine.

use crate::renderer::{RenderContext, RenderResult, Surface};
use kurbo::{Cap, Join, Point, Shape as KurboShape, Stroke};
use peniko::Color;
use sketchboard_core::shapes::{Shape, ShapeKind, TEXT_FONT_SIZE, TEXT_LINE_HEIGHT, text_bounds};

/// Extra width of the highlight stroke over the shape's own stroke.
const HIGHLIGHT_EXTRA_WIDTH: f64 = 6.0;

/// Padding between a highlighted text block and its outline.
const TEXT_HIGHLIGHT_PADDING: f64 = 4.0;

/// Paints shapes onto a [`Surface`].
///
/// Every call to [`DrawingEngine::render`] repaints the whole canvas; the
/// engine keeps no per-frame state.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawingEngine {
    corner_radius: f64,
}

impl DrawingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Round rectangle corners by `radius` (0 = sharp corners).
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius.max(0.0);
        self
    }

    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    /// Clear the surface, paint committed shapes in order, then the transient
    /// shape on top.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        ctx: &RenderContext<'_>,
    ) -> RenderResult<()> {
        surface.clear(ctx.canvas_size, ctx.background_color)?;
        for shape in ctx.shapes {
            if ctx.highlighted == Some(shape.id()) {
                self.draw_highlight(surface, shape, ctx.highlight_color)?;
            }
            self.draw_shape(surface, shape)?;
        }
        if let Some(transient) = ctx.transient {
            self.draw_shape(surface, transient)?;
        }
        Ok(())
    }

    /// Paint a single shape in its own style.
    pub fn draw_shape<S: Surface + ?Sized>(&self, surface: &mut S, shape: &Shape) -> RenderResult<()> {
        let color = shape.style.stroke();
        if let ShapeKind::Text { text } = &shape.kind {
            return draw_text(surface, shape.start_point, text, color);
        }

        let path = shape.to_path(self.corner_radius);
        if let Some(fill) = shape.style.fill().filter(|_| shape.kind.is_closed()) {
            surface.fill_path(&path, fill)?;
        }
        surface.stroke_path(&path, &round_stroke(shape.style.stroke_width), color)
    }

    fn draw_highlight<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        shape: &Shape,
        color: Color,
    ) -> RenderResult<()> {
        let path = match shape.kind {
            ShapeKind::Text { ref text } => text_bounds(shape.start_point, text)
                .inflate(TEXT_HIGHLIGHT_PADDING, TEXT_HIGHLIGHT_PADDING)
                .to_path(0.1),
            _ => shape.to_path(self.corner_radius),
        };
        let width = shape.style.stroke_width + HIGHLIGHT_EXTRA_WIDTH;
        surface.stroke_path(&path, &round_stroke(width), color)
    }
}

fn round_stroke(width: f64) -> Stroke {
    Stroke::new(width).with_caps(Cap::Round).with_join(Join::Round)
}

/// Left-aligned lines at a fixed line height, no wrapping.
fn draw_text<S: Surface + ?Sized>(
    surface: &mut S,
    anchor: Point,
    text: &str,
    color: Color,
) -> RenderResult<()> {
    for (i, line) in text.split('\n').enumerate() {
        let origin = Point::new(anchor.x, anchor.y + i as f64 * TEXT_LINE_HEIGHT);
        surface.fill_text(line, origin, TEXT_FONT_SIZE, color)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RendererError;
    use kurbo::{BezPath, Size, Vec2};
    use sketchboard_core::shapes::{SerializableColor, ShapeStyle};

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Stroke { width: f64, color: SerializableColor, bounds: kurbo::Rect, elements: usize },
        Fill { color: SerializableColor },
        Text { text: String, origin: Point, size: f64 },
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Surface for Recorder {
        fn clear(&mut self, _size: Size, _background: Color) -> RenderResult<()> {
            self.ops.clear();
            self.ops.push(Op::Clear);
            Ok(())
        }

        fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color) -> RenderResult<()> {
            assert_eq!(stroke.start_cap, Cap::Round);
            assert_eq!(stroke.join, Join::Round);
            self.ops.push(Op::Stroke {
                width: stroke.width,
                color: color.into(),
                bounds: path.bounding_box(),
                elements: path.elements().len(),
            });
            Ok(())
        }

        fn fill_path(&mut self, _path: &BezPath, color: Color) -> RenderResult<()> {
            self.ops.push(Op::Fill { color: color.into() });
            Ok(())
        }

        fn fill_text(&mut self, text: &str, origin: Point, size: f64, _color: Color) -> RenderResult<()> {
            self.ops.push(Op::Text {
                text: text.to_string(),
                origin,
                size,
            });
            Ok(())
        }
    }

    fn shape(kind: ShapeKind, a: (f64, f64), b: (f64, f64)) -> Shape {
        Shape::new(kind, a.into(), b.into(), ShapeStyle::default())
    }

    fn render(shapes: &[Shape], transient: Option<&Shape>, highlight: Option<Shape>) -> Vec<Op> {
        let mut recorder = Recorder::default();
        let ctx = RenderContext::new(shapes, Size::new(800.0, 600.0))
            .with_transient(transient)
            .with_highlight(highlight.as_ref().map(Shape::id));
        DrawingEngine::new().render(&mut recorder, &ctx).unwrap();
        recorder.ops
    }

    fn stroke_bounds(op: &Op) -> kurbo::Rect {
        match op {
            Op::Stroke { bounds, .. } => *bounds,
            other => panic!("expected a stroke, got {other:?}"),
        }
    }

    #[test]
    fn test_paints_in_order_with_transient_last() {
        let bottom = shape(ShapeKind::Line, (0.0, 0.0), (10.0, 0.0));
        let top = shape(ShapeKind::Line, (0.0, 50.0), (10.0, 50.0));
        let transient = shape(ShapeKind::Rectangle, (5.0, 5.0), (400.0, 400.0));
        let ops = render(&[bottom, top], Some(&transient), None);

        assert_eq!(ops.len(), 4);
        assert_eq!(ops[0], Op::Clear);
        assert!((stroke_bounds(&ops[1]).y0 - 0.0).abs() < 1e-9);
        assert!((stroke_bounds(&ops[2]).y0 - 50.0).abs() < 1e-9);
        assert!((stroke_bounds(&ops[3]).x1 - 400.0).abs() < 1e-6);
    }

    #[test]
    fn test_rectangle_spans_anchors_in_any_order() {
        let rect = shape(ShapeKind::Rectangle, (100.0, 80.0), (10.0, 10.0));
        let ops = render(&[rect], None, None);
        let bounds = stroke_bounds(&ops[1]);
        assert!((bounds.x0 - 10.0).abs() < 1e-6 && (bounds.y0 - 10.0).abs() < 1e-6);
        assert!((bounds.x1 - 100.0).abs() < 1e-6 && (bounds.y1 - 80.0).abs() < 1e-6);
    }

    #[test]
    fn test_ellipse_and_circle_extents() {
        let ellipse = shape(ShapeKind::Ellipse, (0.0, 0.0), (100.0, 40.0));
        let circle = shape(ShapeKind::Circle, (0.0, 0.0), (60.0, 80.0));
        let ops = render(&[ellipse, circle], None, None);

        let e = stroke_bounds(&ops[1]);
        assert!((e.width() - 100.0).abs() < 1e-3 && (e.height() - 40.0).abs() < 1e-3);
        // Circle through both anchors: diameter = anchor distance = 100
        let c = stroke_bounds(&ops[2]);
        assert!((c.width() - 100.0).abs() < 1e-3 && (c.height() - 100.0).abs() < 1e-3);
        assert!((c.center().x - 30.0).abs() < 1e-3 && (c.center().y - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_arrow_has_two_head_strokes() {
        let arrow = shape(ShapeKind::Arrow, (0.0, 0.0), (100.0, 0.0));
        let line = shape(ShapeKind::Line, (0.0, 0.0), (100.0, 0.0));
        let ops = render(&[arrow, line], None, None);
        match (&ops[1], &ops[2]) {
            (
                Op::Stroke { elements: arrow_elements, bounds, .. },
                Op::Stroke { elements: line_elements, .. },
            ) => {
                assert_eq!(*line_elements, 2);
                assert_eq!(*arrow_elements, 6);
                // Head strokes reach 20 * sin(30°) = 10px either side
                assert!((bounds.y1 - 10.0).abs() < 1e-6);
                assert!((bounds.y0 + 10.0).abs() < 1e-6);
            }
            other => panic!("unexpected ops {other:?}"),
        }
    }

    #[test]
    fn test_multiline_text() {
        let text = Shape::text(Point::new(10.0, 20.0), "one\ntwo\n\nfour", ShapeStyle::default());
        let ops = render(&[text], None, None);
        let lines: Vec<_> = ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, origin, size } => Some((text.clone(), *origin, *size)),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], ("one".to_string(), Point::new(10.0, 20.0), 16.0));
        assert_eq!(lines[1].1, Point::new(10.0, 40.0));
        assert_eq!(lines[3], ("four".to_string(), Point::new(10.0, 80.0), 16.0));
    }

    #[test]
    fn test_highlight_drawn_under_shape_without_changing_style() {
        let rect = shape(ShapeKind::Rectangle, (10.0, 10.0), (50.0, 50.0));
        let ops = render(&[rect.clone()], None, Some(rect.clone()));
        assert_eq!(ops.len(), 3);
        match (&ops[1], &ops[2]) {
            (Op::Stroke { width: hw, color: hc, .. }, Op::Stroke { width, color, .. }) => {
                assert!(*hw > *width);
                assert_ne!(hc, color);
                assert!((width - rect.style.stroke_width).abs() < f64::EPSILON);
                assert_eq!(*color, rect.style.color);
            }
            other => panic!("unexpected ops {other:?}"),
        }
    }

    #[test]
    fn test_fill_before_stroke_for_closed_shapes_only() {
        let style = ShapeStyle {
            fill_color: Some(SerializableColor::rgb(255, 0, 0)),
            ..ShapeStyle::default()
        };
        let rect = Shape::new(ShapeKind::Rectangle, Point::ZERO, Point::new(10.0, 10.0), style.clone());
        let line = Shape::new(ShapeKind::Line, Point::ZERO, Point::new(10.0, 10.0), style);
        let ops = render(&[rect, line], None, None);
        assert!(matches!(ops[1], Op::Fill { .. }));
        assert!(matches!(ops[2], Op::Stroke { .. }));
        assert!(matches!(ops[3], Op::Stroke { .. }));
        assert_eq!(ops.len(), 4);
    }

    #[test]
    fn test_corner_radius_option() {
        let rect = shape(ShapeKind::Rectangle, (0.0, 0.0), (100.0, 100.0));
        let mut sharp = Recorder::default();
        let mut rounded = Recorder::default();
        let shapes = [rect];
        let ctx = RenderContext::new(&shapes, Size::new(200.0, 200.0));
        DrawingEngine::new().render(&mut sharp, &ctx).unwrap();
        DrawingEngine::new()
            .with_corner_radius(12.0)
            .render(&mut rounded, &ctx)
            .unwrap();
        assert_ne!(sharp.ops[1], rounded.ops[1]);
    }

    #[test]
    fn test_render_is_a_full_repaint() {
        let line = shape(ShapeKind::Line, (0.0, 0.0), (10.0, 0.0));
        let mut recorder = Recorder::default();
        let shapes = [line.clone()];
        let ctx = RenderContext::new(&shapes, Size::new(100.0, 100.0));
        let engine = DrawingEngine::new();
        engine.render(&mut recorder, &ctx).unwrap();
        let first = recorder.ops.clone();
        engine.render(&mut recorder, &ctx).unwrap();
        assert_eq!(recorder.ops, first);

        let moved = [line.translated(Vec2::new(0.0, 30.0))];
        engine
            .render(&mut recorder, &RenderContext::new(&moved, Size::new(100.0, 100.0)))
            .unwrap();
        assert_eq!(recorder.ops.len(), 2);
    }

    struct BrokenSurface;

    impl Surface for BrokenSurface {
        fn clear(&mut self, _: Size, _: Color) -> RenderResult<()> {
            Ok(())
        }
        fn stroke_path(&mut self, _: &BezPath, _: &Stroke, _: Color) -> RenderResult<()> {
            Err(RendererError::Surface("lost context".to_string()))
        }
        fn fill_path(&mut self, _: &BezPath, _: Color) -> RenderResult<()> {
            Ok(())
        }
        fn fill_text(&mut self, _: &str, _: Point, _: f64, _: Color) -> RenderResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_surface_errors_propagate() {
        let shapes = [shape(ShapeKind::Line, (0.0, 0.0), (10.0, 0.0))];
        let ctx = RenderContext::new(&shapes, Size::new(100.0, 100.0));
        let result = DrawingEngine::new().render(&mut BrokenSurface, &ctx);
        assert!(matches!(result, Err(RendererError::Surface(_))));
    }
}
