//! Keyboard input and shortcut resolution.

use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// A key press, identified by its logical key value (e.g. `"z"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }

    /// A key pressed without modifiers.
    pub fn plain(key: impl Into<String>) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// A key pressed with Ctrl held.
    pub fn ctrl(key: impl Into<String>) -> Self {
        Self::new(
            key,
            Modifiers {
                ctrl: true,
                ..Modifiers::NONE
            },
        )
    }

    fn single_char(&self) -> Option<char> {
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

/// What a recognized key combination does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Undo,
    Redo,
    SelectTool(ToolKind),
}

/// Map a key press to its action.
///
/// Undo is Ctrl/Cmd+Z; redo is Ctrl/Cmd+Y or Ctrl/Cmd+Shift+Z. Tool keys
/// only apply without modifiers.
pub fn resolve_shortcut(event: &KeyEvent) -> Option<ShortcutAction> {
    let c = event.single_char()?.to_ascii_lowercase();
    let mods = event.modifiers;
    if mods.command() && !mods.alt {
        return match (c, mods.shift) {
            ('z', false) => Some(ShortcutAction::Undo),
            ('z', true) | ('y', false) => Some(ShortcutAction::Redo),
            _ => None,
        };
    }
    if mods.any() {
        return None;
    }
    ToolKind::from_shortcut(c).map(ShortcutAction::SelectTool)
}

/// Result of offering a key press to the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// The key triggered an action.
    pub handled: bool,
    /// The host should suppress the platform's default handling (e.g. the
    /// browser's own undo).
    pub prevent_default: bool,
}

impl KeyOutcome {
    pub const IGNORED: KeyOutcome = KeyOutcome {
        handled: false,
        prevent_default: false,
    };
}
