//! Tool selection for the sketch board.

use crate::shapes::ShapeKind;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Rectangle,
    Ellipse,
    Line,
    Arrow,
    Text,
    Eraser,
    Move,
}

impl ToolKind {
    /// Every tool in toolbar order.
    pub fn all() -> &'static [ToolKind] {
        &[
            ToolKind::Rectangle,
            ToolKind::Ellipse,
            ToolKind::Line,
            ToolKind::Arrow,
            ToolKind::Text,
            ToolKind::Eraser,
            ToolKind::Move,
        ]
    }

    /// The shape a drag with this tool produces. `None` for text (created via
    /// the overlay), eraser and move.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Rectangle => Some(ShapeKind::Rectangle),
            ToolKind::Ellipse => Some(ShapeKind::Ellipse),
            ToolKind::Line => Some(ShapeKind::Line),
            ToolKind::Arrow => Some(ShapeKind::Arrow),
            ToolKind::Text | ToolKind::Eraser | ToolKind::Move => None,
        }
    }

    /// Whether hovering highlights the shape under the pointer.
    pub fn shows_hover(self) -> bool {
        matches!(self, ToolKind::Eraser | ToolKind::Move)
    }

    /// Single-key tool shortcut (no modifiers).
    pub fn from_shortcut(key: char) -> Option<ToolKind> {
        match key.to_ascii_lowercase() {
            '1' => Some(ToolKind::Rectangle),
            '2' => Some(ToolKind::Arrow),
            '3' => Some(ToolKind::Text),
            '4' => Some(ToolKind::Line),
            '5' => Some(ToolKind::Ellipse),
            'e' => Some(ToolKind::Eraser),
            'm' => Some(ToolKind::Move),
            _ => None,
        }
    }

    pub fn shortcut(self) -> char {
        match self {
            ToolKind::Rectangle => '1',
            ToolKind::Arrow => '2',
            ToolKind::Text => '3',
            ToolKind::Line => '4',
            ToolKind::Ellipse => '5',
            ToolKind::Eraser => 'e',
            ToolKind::Move => 'm',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Rectangle => "rectangle",
            ToolKind::Ellipse => "ellipse",
            ToolKind::Line => "line",
            ToolKind::Arrow => "arrow",
            ToolKind::Text => "text",
            ToolKind::Eraser => "eraser",
            ToolKind::Move => "move",
        }
    }
}
