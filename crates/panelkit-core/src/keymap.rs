//! Keyboard shortcut registry.

use crate::command::Command;
use crate::input::{Key, Modifiers};
use crate::mode::EditMode;

/// A keyboard shortcut bound to a command.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
    pub command: Command,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: Key,
        ctrl: bool,
        shift: bool,
        command: Command,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            command,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Shift+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        parts.push(self.key.label());
        parts.join("+")
    }

    /// Check if a key press triggers this shortcut. Ctrl and Cmd are equivalent.
    pub fn matches(&self, key: Key, modifiers: Modifiers) -> bool {
        self.key.normalized() == key.normalized()
            && self.ctrl == modifiers.command()
            && self.shift == modifiers.shift
    }
}

/// Registry of all keyboard shortcuts.
pub struct Keymap;

impl Keymap {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new(Key::Char('z'), true, false, Command::Undo, "Undo"),
            Shortcut::new(Key::Char('y'), true, false, Command::Redo, "Redo"),
            Shortcut::new(Key::Char('z'), true, true, Command::Redo, "Redo"),
            Shortcut::new(Key::Delete, false, false, Command::DeleteSelected, "Delete selected panel"),
            Shortcut::new(Key::Backspace, false, false, Command::DeleteSelected, "Delete selected panel"),
            Shortcut::new(Key::Char('d'), false, false, Command::ToggleDrawMode, "Toggle draw mode"),
            Shortcut::new(Key::Char('m'), false, false, Command::ToggleMergeMode, "Toggle merge mode"),
            Shortcut::new(Key::Enter, false, false, Command::MergeSelected, "Merge selected panels"),
            Shortcut::new(Key::Char('n'), false, false, Command::AddPanel, "Add panel"),
            Shortcut::new(Key::Char('e'), false, false, Command::ToggleEffects, "Toggle effect overlay"),
            Shortcut::new(Key::PageUp, false, false, Command::PreviousPage, "Previous page"),
            Shortcut::new(Key::PageDown, false, false, Command::NextPage, "Next page"),
            Shortcut::new(
                Key::Escape,
                false,
                false,
                Command::SetMode {
                    mode: EditMode::Normal,
                },
                "Back to normal mode",
            ),
        ]
    }

    /// Command bound to a key press, if any.
    pub fn resolve(key: Key, modifiers: Modifiers) -> Option<Command> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(key, modifiers))
            .map(|shortcut| shortcut.command)
    }
}
