//! Surface abstraction and per-frame render context.

use kurbo::{BezPath, Point, Size, Stroke};
use peniko::Color;
use sketchboard_core::shapes::{Shape, ShapeId};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl From<std::fmt::Error> for RendererError {
    fn from(e: std::fmt::Error) -> Self {
        RendererError::Surface(e.to_string())
    }
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// A 2D drawing target.
///
/// Coordinates are canvas pixels with the origin at the top-left.
pub trait Surface {
    /// Discard everything drawn so far and fill the canvas with `background`.
    fn clear(&mut self, size: Size, background: Color) -> RenderResult<()>;

    /// Stroke a path.
    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color) -> RenderResult<()>;

    /// Fill a closed path (non-zero winding).
    fn fill_path(&mut self, path: &BezPath, color: Color) -> RenderResult<()>;

    /// Draw one line of text with its top-left corner at `origin`.
    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        font_size: f64,
        color: Color,
    ) -> RenderResult<()>;
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// Committed shapes in paint order.
    pub shapes: &'a [Shape],
    /// Provisional shape of an in-progress gesture, painted last.
    pub transient: Option<&'a Shape>,
    /// Shape to draw with the highlight treatment.
    pub highlighted: Option<&'a ShapeId>,
    /// Canvas size in pixels.
    pub canvas_size: Size,
    /// Background color.
    pub background_color: Color,
    /// Highlight color.
    pub highlight_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(shapes: &'a [Shape], canvas_size: Size) -> Self {
        Self {
            shapes,
            transient: None,
            highlighted: None,
            canvas_size,
            background_color: Color::from_rgba8(255, 255, 255, 255),
            highlight_color: Color::from_rgba8(59, 130, 246, 160), // Blue
        }
    }

    pub fn with_transient(mut self, shape: Option<&'a Shape>) -> Self {
        self.transient = shape;
        self
    }

    pub fn with_highlight(mut self, id: Option<&'a ShapeId>) -> Self {
        self.highlighted = id;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_highlight_color(mut self, color: Color) -> Self {
        self.highlight_color = color;
        self
    }
}
