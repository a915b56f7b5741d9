//! Recorded input scripts.
//!
//! A script is a JSON array of events, each tagged by `type`:
//!
//! ```json
//! [
//!   { "type": "setTool", "tool": "rectangle" },
//!   { "type": "pointerDown", "x": 10, "y": 10 },
//!   { "type": "pointerMove", "x": 100, "y": 80 },
//!   { "type": "pointerUp", "x": 100, "y": 80 },
//!   { "type": "key", "key": "z", "modifiers": { "ctrl": true } },
//!   { "type": "wait", "ms": 600 }
//! ]
//! ```

use crate::error::AppResult;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use sketchboard_core::{KeyEvent, Modifiers, ToolKind};
use std::path::Path;
use std::time::Duration;

/// One recorded input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScriptEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    PointerLeave,
    SetTool { tool: ToolKind },
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    SubmitText { text: String },
    CancelText,
    Undo,
    Redo,
    Clear,
    /// Advance the session clock without input.
    Wait { ms: u64 },
}

impl ScriptEvent {
    /// Canvas position of pointer events.
    pub fn point(&self) -> Option<Point> {
        match *self {
            ScriptEvent::PointerDown { x, y }
            | ScriptEvent::PointerMove { x, y }
            | ScriptEvent::PointerUp { x, y } => Some(Point::new(x, y)),
            _ => None,
        }
    }

    pub fn key_event(&self) -> Option<KeyEvent> {
        match self {
            ScriptEvent::Key { key, modifiers } => Some(KeyEvent::new(key.clone(), *modifiers)),
            _ => None,
        }
    }
}

/// An ordered list of events to replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub events: Vec<ScriptEvent>,
}

impl Script {
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let script = Self::from_json(&json)?;
        log::info!(
            "Loaded {} events from {}",
            script.events.len(),
            path.as_ref().display()
        );
        Ok(script)
    }

    /// Total time covered by `wait` events.
    pub fn duration(&self) -> Duration {
        self.events
            .iter()
            .map(|event| match event {
                ScriptEvent::Wait { ms } => Duration::from_millis(*ms),
                _ => Duration::ZERO,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tagged_events() {
        let script = Script::from_json(
            r#"[
                {"type": "setTool", "tool": "arrow"},
                {"type": "pointerDown", "x": 1, "y": 2.5},
                {"type": "pointerLeave"},
                {"type": "key", "key": "z", "modifiers": {"ctrl": true, "shift": true}},
                {"type": "key", "key": "e"},
                {"type": "submitText", "text": "hi"},
                {"type": "wait", "ms": 250}
            ]"#,
        )
        .unwrap();

        assert_eq!(script.events.len(), 7);
        assert_eq!(
            script.events[0],
            ScriptEvent::SetTool {
                tool: ToolKind::Arrow
            }
        );
        assert_eq!(script.events[1].point(), Some(Point::new(1.0, 2.5)));
        assert_eq!(script.events[2], ScriptEvent::PointerLeave);

        let redo = script.events[3].key_event().unwrap();
        assert!(redo.modifiers.ctrl && redo.modifiers.shift);
        assert!(!script.events[4].key_event().unwrap().modifiers.any());
        assert_eq!(script.duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        assert!(Script::from_json(r#"[{"type": "teleport"}]"#).is_err());
        assert!(Script::from_json(r#"{"type": "undo"}"#).is_err());
    }

    #[test]
    fn test_unknown_tool_is_rejected() {
        assert!(Script::from_json(r#"[{"type": "setTool", "tool": "lasso"}]"#).is_err());
    }
}
