//! Shape definitions for the sketch board.

mod arrow;
mod ellipse;
mod line;
mod rectangle;
mod text;

pub use arrow::{ARROW_HEAD_ANGLE, ARROW_HEAD_LENGTH, arrow_head};
pub use ellipse::circle_radius;
pub use text::{TEXT_CHAR_WIDTH, TEXT_FONT_SIZE, TEXT_LINE_HEIGHT, text_bounds};

use crate::geometry::HitTolerance;
use kurbo::{BezPath, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for shapes.
///
/// Any string unique within a store is accepted, so sketches saved with
/// timestamp-style ids load unchanged. New shapes get a v4 UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(String);

impl ShapeId {
    /// A fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ShapeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ShapeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {0:?}: expected #rgb, #rrggbb or #rrggbbaa")]
pub struct ColorParseError(pub String);

/// Serializable color representation (RGBA8).
///
/// Persisted as a CSS hex string so saved sketches stay readable by the web
/// front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// Default ink color for new shapes.
    pub const fn ink() -> Self {
        Self::rgb(0x2c, 0x3e, 0x50)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for SerializableColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let nibble = |i: usize| {
            u8::from_str_radix(&hex[i..i + 1], 16)
                .map(|v| v * 17)
                .map_err(|_| err())
        };
        match hex.len() {
            3 => Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for SerializableColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SerializableColor> for String {
    fn from(color: SerializableColor) -> Self {
        color.to_hex()
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    /// Stroke color (also used as the text fill).
    pub color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
    /// Fill color (None = no fill).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<SerializableColor>,
}

impl ShapeStyle {
    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.color.into()
    }

    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Option<Color> {
        self.fill_color.map(Into::into)
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            color: SerializableColor::ink(),
            stroke_width: 2.0,
            fill_color: None,
        }
    }
}

/// The shape variant, serialized as the `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    /// Circle through both anchors (radius = half the anchor distance).
    Circle,
    Line,
    Arrow,
    Text { text: String },
}

impl ShapeKind {
    /// Whether the shape has an interior (used by the eraser collision test).
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            ShapeKind::Rectangle | ShapeKind::Ellipse | ShapeKind::Circle | ShapeKind::Text { .. }
        )
    }

    /// Whether the finalized endpoint is angle-snapped.
    pub fn snaps_angle(&self) -> bool {
        matches!(self, ShapeKind::Line | ShapeKind::Arrow)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Circle => "circle",
            ShapeKind::Line => "line",
            ShapeKind::Arrow => "arrow",
            ShapeKind::Text { .. } => "text",
        }
    }
}

/// A committed drawable entity.
///
/// Every shape is described by two anchors. Edits never mutate a committed
/// shape in place: helpers such as [`Shape::translated`] return a new value
/// which the store swaps in by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub(crate) id: ShapeId,
    #[serde(flatten)]
    pub kind: ShapeKind,
    /// First drag anchor (insertion anchor for text).
    pub start_point: Point,
    /// Second drag anchor (equal to `start_point` for text).
    pub end_point: Point,
    pub style: ShapeStyle,
}

impl Shape {
    /// Create a shape with a fresh id.
    pub fn new(kind: ShapeKind, start_point: Point, end_point: Point, style: ShapeStyle) -> Self {
        Self {
            id: ShapeId::new(),
            kind,
            start_point,
            end_point,
            style,
        }
    }

    /// Create a text shape anchored at `anchor`.
    pub fn text(anchor: Point, content: impl Into<String>, style: ShapeStyle) -> Self {
        Self::new(
            ShapeKind::Text {
                text: content.into(),
            },
            anchor,
            anchor,
            style,
        )
    }

    /// Reconstruct a shape with a specific ID (for storage and tests).
    pub fn with_id(
        id: ShapeId,
        kind: ShapeKind,
        start_point: Point,
        end_point: Point,
        style: ShapeStyle,
    ) -> Self {
        Self {
            id,
            kind,
            start_point,
            end_point,
            style,
        }
    }

    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Text content, if this is a text shape.
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            ShapeKind::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Whether both anchors coincide (a click without drag).
    pub fn is_degenerate(&self) -> bool {
        !matches!(self.kind, ShapeKind::Text { .. }) && self.start_point == self.end_point
    }

    /// Axis-aligned bounding box.
    pub fn bounds(&self) -> Rect {
        match &self.kind {
            ShapeKind::Rectangle | ShapeKind::Ellipse | ShapeKind::Line => {
                Rect::from_points(self.start_point, self.end_point)
            }
            ShapeKind::Circle => {
                let center = self.start_point.midpoint(self.end_point);
                let r = circle_radius(self.start_point, self.end_point);
                Rect::new(center.x - r, center.y - r, center.x + r, center.y + r)
            }
            ShapeKind::Arrow => arrow::bounds(self.start_point, self.end_point),
            ShapeKind::Text { text } => text_bounds(self.start_point, text),
        }
    }

    /// Check if a point selects this shape (outline proximity).
    pub fn hit_test(&self, point: Point, tolerance: &HitTolerance) -> bool {
        let (start, end) = (self.start_point, self.end_point);
        match &self.kind {
            ShapeKind::Rectangle => rectangle::hit_test(start, end, point, tolerance.stroke),
            ShapeKind::Ellipse => ellipse::hit_test(start, end, point, tolerance.stroke),
            ShapeKind::Circle => ellipse::circle_hit_test(start, end, point, tolerance.stroke),
            ShapeKind::Line => line::hit_test(start, end, point, tolerance.stroke),
            ShapeKind::Arrow => {
                arrow::hit_test(start, end, point, tolerance.stroke, tolerance.arrow_tip)
            }
            ShapeKind::Text { text } => text::hit_test(start, text, point, tolerance.text),
        }
    }

    /// Check if the eraser touches this shape.
    ///
    /// Closed shapes collide anywhere inside their outline; open shapes fall
    /// back to [`Shape::hit_test`].
    pub fn collides(&self, point: Point, tolerance: &HitTolerance) -> bool {
        let (start, end) = (self.start_point, self.end_point);
        match &self.kind {
            ShapeKind::Rectangle => rectangle::contains(start, end, point, tolerance.stroke),
            ShapeKind::Ellipse => ellipse::contains(start, end, point, tolerance.stroke),
            ShapeKind::Circle => ellipse::circle_contains(start, end, point, tolerance.stroke),
            ShapeKind::Line | ShapeKind::Arrow | ShapeKind::Text { .. } => {
                self.hit_test(point, tolerance)
            }
        }
    }

    /// Outline path for rendering. Text has no path; use [`text_bounds`].
    pub fn to_path(&self, corner_radius: f64) -> BezPath {
        let (start, end) = (self.start_point, self.end_point);
        match &self.kind {
            ShapeKind::Rectangle => rectangle::to_path(start, end, corner_radius),
            ShapeKind::Ellipse => ellipse::to_path(start, end),
            ShapeKind::Circle => ellipse::circle_path(start, end),
            ShapeKind::Line => line::to_path(start, end),
            ShapeKind::Arrow => arrow::to_path(start, end),
            ShapeKind::Text { .. } => BezPath::new(),
        }
    }

    /// A copy with both anchors shifted by `delta`. The id is preserved.
    pub fn translated(&self, delta: Vec2) -> Shape {
        Shape {
            start_point: self.start_point + delta,
            end_point: self.end_point + delta,
            ..self.clone()
        }
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Shape {
        self.translated(Vec2::new(dx, dy))
    }

    /// A copy with a new end anchor. Text keeps both anchors together.
    pub fn with_end_point(&self, end_point: Point) -> Shape {
        match self.kind {
            ShapeKind::Text { .. } => self.clone(),
            _ => Shape {
                end_point,
                ..self.clone()
            },
        }
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    point.distance(proj)
}
