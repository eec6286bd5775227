//! Editor commands issued by toolbar buttons, the panel list and shortcuts.

use crate::document::Numbering;
use crate::effects::EffectKind;
use crate::geometry::PanelRect;
use crate::input::Modifiers;
use crate::mode::EditMode;
use serde::{Deserialize, Serialize};

/// A discrete editor action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Append the default panel to the current page and select it.
    AddPanel,
    /// Delete the active panel.
    DeleteSelected,
    /// Merge the merge candidates into their bounding box.
    MergeSelected,
    /// Select a panel from the panel list.
    SelectPanel {
        index: usize,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Swap a panel with its predecessor.
    MovePanelUp { index: usize },
    /// Swap a panel with its successor.
    MovePanelDown { index: usize },
    /// Replace a panel's rectangle from the properties form.
    SetPanelRect { index: usize, rect: PanelRect },
    /// Replace all panels of the current page.
    ReplacePanels { panels: Vec<PanelRect> },
    /// Reorder the current page's panels into reading order.
    SortReadingOrder {
        #[serde(default)]
        direction: Option<Numbering>,
    },
    SetMode { mode: EditMode },
    ToggleDrawMode,
    ToggleMergeMode,
    ToggleEffects,
    SetEffect { kind: EffectKind, size: u32 },
    NextPage,
    PreviousPage,
    GoToPage { index: usize },
    Undo,
    Redo,
    /// Tell the session where the canvas is displayed on screen.
    SetCanvasBounds { bounds: kurbo::Rect },
}

impl Command {
    /// Short description for menus and logs.
    pub fn description(&self) -> &'static str {
        match self {
            Command::AddPanel => "Add panel",
            Command::DeleteSelected => "Delete selected panel",
            Command::MergeSelected => "Merge selected panels",
            Command::SelectPanel { .. } => "Select panel",
            Command::MovePanelUp { .. } => "Move panel up",
            Command::MovePanelDown { .. } => "Move panel down",
            Command::SetPanelRect { .. } => "Edit panel",
            Command::ReplacePanels { .. } => "Replace panels",
            Command::SortReadingOrder { .. } => "Sort panels into reading order",
            Command::SetMode { .. } => "Set mode",
            Command::ToggleDrawMode => "Toggle draw mode",
            Command::ToggleMergeMode => "Toggle merge mode",
            Command::ToggleEffects => "Toggle effect overlay",
            Command::SetEffect { .. } => "Set effect",
            Command::NextPage => "Next page",
            Command::PreviousPage => "Previous page",
            Command::GoToPage { .. } => "Go to page",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::SetCanvasBounds { .. } => "Set canvas bounds",
        }
    }
}
