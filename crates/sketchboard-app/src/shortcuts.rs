//! Keyboard shortcut registry and documentation.

use sketchboard_core::ToolKind;

/// A keyboard shortcut definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub description: String,
}

impl Shortcut {
    pub fn new(
        key: impl Into<String>,
        ctrl: bool,
        shift: bool,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            ctrl,
            shift,
            description: description.into(),
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key.as_str());
        parts.join("+")
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts. Cmd works in place of Ctrl.
    pub fn all() -> Vec<Shortcut> {
        let mut shortcuts = vec![
            Shortcut::new("Z", true, false, "Undo"),
            Shortcut::new("Y", true, false, "Redo"),
            Shortcut::new("Z", true, true, "Redo"),
        ];
        shortcuts.extend(ToolKind::all().iter().map(|tool| {
            Shortcut::new(
                tool.shortcut().to_ascii_uppercase().to_string(),
                false,
                false,
                format!("{} tool", tool.name()),
            )
        }));
        shortcuts
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}
