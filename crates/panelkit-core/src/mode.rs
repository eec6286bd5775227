//! Edit modes and in-progress pointer gestures.

use crate::geometry::{HandleKind, PanelRect};
use crate::history::Snapshot;
use serde::{Deserialize, Serialize};

/// Mutually exclusive edit modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    /// Select and resize single panels.
    #[default]
    Normal,
    /// Pointer drags draw new panels.
    Draw,
    /// Clicks collect merge candidates.
    Merge,
}

impl EditMode {
    /// Display name for this mode.
    pub fn name(self) -> &'static str {
        match self {
            EditMode::Normal => "Normal",
            EditMode::Draw => "Draw",
            EditMode::Merge => "Merge",
        }
    }
}

/// A pointer gesture between pointer-down and pointer-up.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Drawing a new panel from a fixed start point.
    Drawing {
        /// Document position where the drag started.
        start: (i32, i32),
        /// Index of the panel being drawn.
        index: usize,
        /// State before the panel was appended; recorded if the panel is kept.
        before: Box<Snapshot>,
    },
    /// Dragging a handle of the active panel.
    Resizing {
        handle: HandleKind,
        /// Index of the panel being resized.
        index: usize,
        /// The panel as it was when the drag started.
        original: PanelRect,
    },
}

impl Gesture {
    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self, Gesture::Idle)
    }

    /// Handle being dragged, if resizing.
    pub fn resize_handle(&self) -> Option<HandleKind> {
        match self {
            Gesture::Resizing { handle, .. } => Some(*handle),
            _ => None,
        }
    }

    /// Check if a panel is being drawn.
    pub fn is_drawing(&self) -> bool {
        matches!(self, Gesture::Drawing { .. })
    }
}
