//! Keyboard shortcuts mapped to engine commands.

use easel_core::{Command, ShapeKind, Tool};

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
    pub command: Command,
}

impl Shortcut {
    pub fn new(key: &'static str, ctrl: bool, shift: bool, description: &'static str, command: Command) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
            command,
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
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, key: &str, ctrl: bool, shift: bool) -> bool {
        self.key.eq_ignore_ascii_case(key) && self.ctrl == ctrl && self.shift == shift
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Z", true, false, "Undo", Command::Undo),
            Shortcut::new("Z", true, true, "Redo", Command::Redo),
            Shortcut::new("Y", true, false, "Redo", Command::Redo),
            Shortcut::new("=", true, false, "Zoom in", Command::ZoomIn),
            Shortcut::new("-", true, false, "Zoom out", Command::ZoomOut),
            Shortcut::new("0", true, false, "Reset zoom", Command::ResetZoom),
            Shortcut::new("Delete", true, false, "Clear canvas", Command::Clear),
            Shortcut::new("B", false, false, "Brush", Command::SetTool(Tool::Brush)),
            Shortcut::new("R", false, false, "Rectangle", Command::SetTool(Tool::Shape(ShapeKind::Rectangle))),
            Shortcut::new("O", false, false, "Circle", Command::SetTool(Tool::Shape(ShapeKind::Circle))),
            Shortcut::new("L", false, false, "Line", Command::SetTool(Tool::Shape(ShapeKind::Line))),
            Shortcut::new("T", false, false, "Text", Command::SetTool(Tool::Text)),
            Shortcut::new("Enter", false, false, "Place pending text", Command::CommitText),
        ]
    }

    /// Command bound to a key chord, if any.
    pub fn lookup(key: &str, ctrl: bool, shift: bool) -> Option<Command> {
        Self::all()
            .into_iter()
            .find(|s| s.matches(key, ctrl, shift))
            .map(|s| s.command)
    }
}
