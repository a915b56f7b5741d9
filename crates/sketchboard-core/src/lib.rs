//! SketchBoard Core Library
//!
//! Platform-agnostic core data structures and logic for the sketch board:
//! shapes and hit testing, the shape store with undo/redo, the pointer
//! gesture controller, and persistence.

pub mod config;
pub mod controller;
pub mod geometry;
pub mod history;
pub mod input;
pub mod shapes;
pub mod snap;
pub mod storage;
pub mod store;
pub mod tools;

pub use config::{ConfigError, SketchConfig};
pub use controller::{CanvasEvent, GestureState, PointerGestureController, TextOverlayRequest};
pub use geometry::{HitTolerance, colliding_shapes, find_shape_at_point};
pub use history::{HistoryManager, Snapshot};
pub use input::{KeyEvent, KeyOutcome, Modifiers, ShortcutAction, resolve_shortcut};
pub use shapes::{SerializableColor, Shape, ShapeId, ShapeKind, ShapeStyle};
pub use snap::{ANGLE_SNAP_INCREMENT, AngleSnapResult, snap_angle, snap_line_endpoint};
pub use store::ShapeStore;
pub use tools::ToolKind;
