//! The editor session: document, selection, mode and history in one place.
//!
//! Every user action arrives either as an [`EditorEvent`] (pointer and
//! keyboard input) or as a [`Command`] (toolbar and panel-list buttons).
//! Both return whether anything visible changed, so a front end knows when
//! to redraw. Ineligible actions are silent no-ops that return `false`.

use crate::command::Command;
use crate::config::EditorConfig;
use crate::document::{Document, Numbering, Page, reading_order};
use crate::effects::{EffectKind, EffectSettings};
use crate::geometry::{PanelRect, handle_at, resize_with_handle, union};
use crate::history::{History, Snapshot};
use crate::input::{EditorEvent, Modifiers};
use crate::keymap::Keymap;
use crate::mapper::CanvasMapper;
use crate::mode::{EditMode, Gesture};
use crate::selection::SelectionState;
use kurbo::{Point, Rect};

/// Editing state for one loaded document.
#[derive(Debug, Clone)]
pub struct EditorSession {
    document: Document,
    page_index: usize,
    selection: SelectionState,
    mode: EditMode,
    gesture: Gesture,
    history: History,
    config: EditorConfig,
    effects: EffectSettings,
    /// On-screen canvas box; `None` means the page is shown 1:1 at the origin.
    canvas_bounds: Option<Rect>,
    /// Last pointer position in document pixels.
    pointer_position: Option<(i32, i32)>,
}

impl EditorSession {
    pub fn new(document: Document, config: EditorConfig) -> Self {
        Self {
            document,
            page_index: 0,
            selection: SelectionState::new(),
            mode: EditMode::Normal,
            gesture: Gesture::Idle,
            history: History::new(config.history_capacity),
            effects: config.effects,
            config,
            canvas_bounds: None,
            pointer_position: None,
        }
    }

    /// Replace the document, dropping selection, gestures and history.
    pub fn load_document(&mut self, document: Document) {
        log::info!("Loaded document with {} page(s)", document.len());
        self.document = document;
        self.page_index = 0;
        self.selection.clear();
        self.mode = EditMode::Normal;
        self.gesture = Gesture::Idle;
        self.history.clear();
        self.pointer_position = None;
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.document.page(self.page_index)
    }

    /// Panels of the current page (empty without pages).
    pub fn panels(&self) -> &[PanelRect] {
        self.current_page().map(|page| page.panels.as_slice()).unwrap_or(&[])
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn effects(&self) -> EffectSettings {
        self.effects
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Last known pointer position in document pixels, for the coordinate readout.
    pub fn pointer_position(&self) -> Option<(i32, i32)> {
        self.pointer_position
    }

    pub fn canvas_bounds(&self) -> Option<Rect> {
        self.canvas_bounds
    }

    /// Mapper for the current page, if there is one.
    pub fn mapper(&self) -> Option<CanvasMapper> {
        let intrinsic = self.current_page()?.size.to_kurbo();
        Some(match self.canvas_bounds {
            Some(bounds) => CanvasMapper::new(bounds, intrinsic),
            None => CanvasMapper::identity(intrinsic),
        })
    }

    // --- Input -----------------------------------------------------------

    /// Feed one input event through the state machine.
    pub fn handle_event(&mut self, event: EditorEvent) -> bool {
        match event {
            EditorEvent::PointerDown {
                position,
                modifiers,
            } => self.pointer_down(position, modifiers),
            EditorEvent::PointerMove { position } => self.pointer_move(position),
            EditorEvent::PointerUp { position } => self.pointer_up(position),
            EditorEvent::PointerLeave { position } => self.pointer_leave(position),
            EditorEvent::KeyPress { key, modifiers } => match Keymap::resolve(key, modifiers) {
                Some(command) => self.execute(command),
                None => false,
            },
        }
    }

    fn pointer_down(&mut self, position: Point, modifiers: Modifiers) -> bool {
        if self.gesture.is_active() {
            return false;
        }
        let Some(mapper) = self.mapper() else {
            return false;
        };

        if self.mode == EditMode::Draw {
            let (x, y) = mapper.to_document_clamped(position);
            self.pointer_position = Some((x, y));
            return self.begin_draw(x, y);
        }

        let (x, y) = mapper.to_document(position);
        self.pointer_position = Some((x, y));

        if self.mode == EditMode::Normal {
            if let Some(index) = self.selection.active() {
                if let Some(&rect) = self.panels().get(index) {
                    if let Some(handle) = handle_at(&rect, x, y, self.config.handle_size) {
                        log::debug!("Resize: start {:?} on panel {}", handle, index);
                        self.gesture = Gesture::Resizing {
                            handle,
                            index,
                            original: rect,
                        };
                        return true;
                    }
                }
            }
        }

        match self.hit_test(x, y) {
            Some(index) if self.mode == EditMode::Merge => {
                self.selection.merge_click(index, modifiers)
            }
            Some(index) => self.selection.select(index),
            None => self.selection.clear(),
        }
        true
    }

    fn pointer_move(&mut self, position: Point) -> bool {
        let Some(mapper) = self.mapper() else {
            return false;
        };

        match self.gesture {
            Gesture::Drawing { start, index, .. } => {
                let current = mapper.to_document_clamped(position);
                self.pointer_position = Some(current);
                let Some(page) = self.document.page_mut(self.page_index) else {
                    return false;
                };
                let rect = drawn_rect(start, current, page.size.width, page.size.height);
                match page.panels.get_mut(index) {
                    Some(panel) => {
                        *panel = rect;
                        true
                    }
                    None => false,
                }
            }
            Gesture::Resizing {
                handle,
                index,
                original,
            } => {
                let (x, y) = mapper.to_document(position);
                self.pointer_position = Some((x, y));
                let min_extent = self.config.min_resize_extent;
                match self.current_panel_mut(index) {
                    Some(panel) => {
                        *panel = resize_with_handle(&original, handle, x, y, min_extent);
                        true
                    }
                    None => false,
                }
            }
            Gesture::Idle => {
                let mapped = Some(mapper.to_document(position));
                let changed = self.pointer_position != mapped;
                self.pointer_position = mapped;
                changed
            }
        }
    }

    /// Ends the gesture. The release position is applied as a final move first.
    fn pointer_up(&mut self, position: Point) -> bool {
        if !self.gesture.is_active() {
            return false;
        }
        self.pointer_move(position);

        match std::mem::take(&mut self.gesture) {
            Gesture::Drawing { index, before, .. } => {
                let kept = self
                    .panels()
                    .get(index)
                    .is_some_and(|rect| {
                        rect.width >= self.config.min_draw_extent
                            && rect.height >= self.config.min_draw_extent
                    });
                if kept {
                    log::debug!("Draw: committed panel {}", index);
                    self.history.record(*before);
                } else {
                    log::debug!("Draw: discarded undersized panel");
                    if let Some(page) = self.document.page_mut(self.page_index) {
                        if index < page.panels.len() {
                            page.panels.remove(index);
                        }
                    }
                    self.selection.clear_active();
                }
            }
            Gesture::Resizing {
                index, original, ..
            } => {
                if self.panels().get(index).is_some_and(|rect| *rect != original) {
                    let mut before = self.snapshot();
                    if let Some(panel) = before
                        .document
                        .page_mut(before.page_index)
                        .and_then(|page| page.panels.get_mut(index))
                    {
                        *panel = original;
                    }
                    self.history.record(before);
                    log::debug!("Resize: committed panel {}", index);
                } else {
                    log::debug!("Resize: unchanged");
                }
            }
            Gesture::Idle => {}
        }
        true
    }

    /// Leaving the canvas continues an active gesture.
    fn pointer_leave(&mut self, position: Point) -> bool {
        if self.gesture.is_active() {
            return self.pointer_move(position);
        }
        self.pointer_position.take().is_some()
    }

    fn begin_draw(&mut self, x: i32, y: i32) -> bool {
        let before = self.snapshot();
        let Some(page) = self.document.page_mut(self.page_index) else {
            return false;
        };
        page.panels.push(PanelRect::new(x, y, 0, 0));
        let index = page.panels.len() - 1;
        self.selection.select(index);
        self.gesture = Gesture::Drawing {
            start: (x, y),
            index,
            before: Box::new(before),
        };
        log::debug!("Draw: start at ({}, {})", x, y);
        true
    }

    /// Topmost panel containing the point, skipping panels whose own handle
    /// region also contains it.
    fn hit_test(&self, x: i32, y: i32) -> Option<usize> {
        let handle_size = self.config.handle_size;
        self.panels()
            .iter()
            .enumerate()
            .rev()
            .find(|(_, rect)| rect.contains(x, y) && handle_at(rect, x, y, handle_size).is_none())
            .map(|(index, _)| index)
    }

    /// Abandon an in-progress gesture, restoring the panel it was editing.
    fn cancel_gesture(&mut self) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Drawing { before, .. } => {
                log::debug!("Draw: cancelled");
                let before = *before;
                self.document = before.document;
                self.selection = before.selection;
            }
            Gesture::Resizing {
                index, original, ..
            } => {
                log::debug!("Resize: cancelled");
                if let Some(panel) = self.current_panel_mut(index) {
                    *panel = original;
                }
            }
            Gesture::Idle => {}
        }
    }

    // --- Commands --------------------------------------------------------

    /// Run a command.
    pub fn execute(&mut self, command: Command) -> bool {
        if !matches!(
            command,
            Command::SetCanvasBounds { .. } | Command::ToggleEffects | Command::SetEffect { .. }
        ) {
            self.cancel_gesture();
        }

        match command {
            Command::AddPanel => self.add_panel(),
            Command::DeleteSelected => self.delete_selected(),
            Command::MergeSelected => self.merge_selected(),
            Command::SelectPanel { index, modifiers } => self.select_panel(index, modifiers),
            Command::MovePanelUp { index } => self.move_panel_up(index),
            Command::MovePanelDown { index } => self.move_panel_down(index),
            Command::SetPanelRect { index, rect } => self.set_panel_rect(index, rect),
            Command::ReplacePanels { panels } => self.replace_panels(panels),
            Command::SortReadingOrder { direction } => self.sort_reading_order(direction),
            Command::SetMode { mode } => self.set_mode(mode),
            Command::ToggleDrawMode => self.toggle_draw_mode(),
            Command::ToggleMergeMode => self.toggle_merge_mode(),
            Command::ToggleEffects => self.toggle_effects(),
            Command::SetEffect { kind, size } => self.set_effect(kind, size),
            Command::NextPage => self.next_page(),
            Command::PreviousPage => self.previous_page(),
            Command::GoToPage { index } => self.go_to_page(index),
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::SetCanvasBounds { bounds } => self.set_canvas_bounds(bounds),
        }
    }

    /// Append the configured default panel and select it.
    pub fn add_panel(&mut self) -> bool {
        if self.current_page().is_none() {
            return false;
        }
        self.record();
        let rect = self.config.default_panel;
        let Some(page) = self.document.page_mut(self.page_index) else {
            return false;
        };
        page.panels.push(rect);
        let index = page.panels.len() - 1;
        if self.mode == EditMode::Merge {
            self.selection.merge_click(index, Modifiers::NONE);
        } else {
            self.selection.select(index);
        }
        log::info!("Added panel {}", index);
        true
    }

    /// Remove the active panel.
    pub fn delete_selected(&mut self) -> bool {
        let Some(index) = self.selection.active() else {
            return false;
        };
        if index >= self.panels().len() {
            return false;
        }
        self.record();
        if let Some(page) = self.document.page_mut(self.page_index) {
            page.panels.remove(index);
        }
        self.selection.clear();
        log::info!("Deleted panel {}", index);
        true
    }

    /// Replace the merge candidates by their bounding box, placed at the
    /// smallest candidate's index. Needs at least two candidates.
    pub fn merge_selected(&mut self) -> bool {
        let count = self.panels().len();
        let indices: Vec<usize> = self
            .selection
            .merge_indices_sorted()
            .into_iter()
            .filter(|&i| i < count)
            .collect();
        if indices.len() < 2 {
            return false;
        }
        let panels = self.panels();
        let Some(merged) = union(indices.iter().map(|&i| &panels[i])) else {
            return false;
        };
        let first = indices[0];

        self.record();
        if let Some(page) = self.document.page_mut(self.page_index) {
            for &index in indices.iter().rev() {
                page.panels.remove(index);
            }
            page.panels.insert(first, merged);
        }
        self.selection.select(first);
        self.mode = EditMode::Normal;
        log::info!("Merged {} panels into panel {}", indices.len(), first);
        true
    }

    /// Select a panel from the panel list, honoring merge-mode modifiers.
    pub fn select_panel(&mut self, index: usize, modifiers: Modifiers) -> bool {
        if index >= self.panels().len() {
            log::warn!("Cannot select panel {}: page has {} panel(s)", index, self.panels().len());
            return false;
        }
        if self.mode == EditMode::Merge {
            self.selection.merge_click(index, modifiers);
        } else {
            self.selection.select(index);
        }
        true
    }

    /// Swap a panel with its predecessor.
    pub fn move_panel_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.panels().len() {
            return false;
        }
        self.swap_panels(index - 1, index)
    }

    /// Swap a panel with its successor.
    pub fn move_panel_down(&mut self, index: usize) -> bool {
        if index >= self.panels().len().saturating_sub(1) {
            return false;
        }
        self.swap_panels(index, index + 1)
    }

    fn swap_panels(&mut self, a: usize, b: usize) -> bool {
        self.record();
        if let Some(page) = self.document.page_mut(self.page_index) {
            page.panels.swap(a, b);
        }
        self.selection.remap_swap(a, b);
        log::debug!("Swapped panels {} and {}", a, b);
        true
    }

    /// Replace one panel's rectangle.
    pub fn set_panel_rect(&mut self, index: usize, rect: PanelRect) -> bool {
        let Some(&current) = self.panels().get(index) else {
            log::warn!("Cannot edit panel {}: no such panel", index);
            return false;
        };
        if !rect.is_valid() {
            log::warn!("Rejected panel {} edit with non-positive size {:?}", index, rect);
            return false;
        }
        if current == rect {
            return false;
        }
        self.record();
        if let Some(panel) = self.current_panel_mut(index) {
            *panel = rect;
        }
        true
    }

    /// Replace every panel of the current page. Clears the selection.
    pub fn replace_panels(&mut self, panels: Vec<PanelRect>) -> bool {
        if self.current_page().is_none() || self.panels() == panels.as_slice() {
            return false;
        }
        if let Some(bad) = panels.iter().position(|rect| !rect.is_valid()) {
            log::warn!("Rejected panel list: panel {} has non-positive size", bad);
            return false;
        }
        self.record();
        if let Some(page) = self.document.page_mut(self.page_index) {
            page.panels = panels;
        }
        self.selection.clear();
        log::info!("Replaced panels of page {}", self.page_index);
        true
    }

    /// Reorder the current page's panels into reading order.
    ///
    /// The direction defaults to the page's numbering, then left-to-right.
    pub fn sort_reading_order(&mut self, direction: Option<Numbering>) -> bool {
        let Some(page) = self.current_page() else {
            return false;
        };
        let direction = direction.or(page.numbering).unwrap_or_default();
        let order = reading_order(&page.panels, direction);
        if order.iter().enumerate().all(|(pos, &i)| pos == i) {
            return false;
        }

        self.record();
        if let Some(page) = self.document.page_mut(self.page_index) {
            page.panels = order.iter().map(|&i| page.panels[i]).collect();
        }
        let mut new_index = vec![0; order.len()];
        for (pos, &old) in order.iter().enumerate() {
            new_index[old] = pos;
        }
        self.selection
            .remap(|old| new_index.get(old).copied().unwrap_or(old));
        log::info!("Sorted {} panels into {:?} reading order", order.len(), direction);
        true
    }

    /// Switch edit mode, migrating or clearing selection for the mode left.
    pub fn set_mode(&mut self, mode: EditMode) -> bool {
        if self.mode == mode {
            return false;
        }
        match (self.mode, mode) {
            (_, EditMode::Merge) => self.selection.enter_merge(),
            (EditMode::Merge, _) => self.selection.leave_merge(),
            _ => {}
        }
        log::debug!("Mode: {} -> {}", self.mode.name(), mode.name());
        self.mode = mode;
        true
    }

    pub fn toggle_draw_mode(&mut self) -> bool {
        let mode = if self.mode == EditMode::Draw {
            EditMode::Normal
        } else {
            EditMode::Draw
        };
        self.set_mode(mode)
    }

    pub fn toggle_merge_mode(&mut self) -> bool {
        let mode = if self.mode == EditMode::Merge {
            EditMode::Normal
        } else {
            EditMode::Merge
        };
        self.set_mode(mode)
    }

    pub fn toggle_effects(&mut self) -> bool {
        self.effects.enabled = !self.effects.enabled;
        true
    }

    pub fn set_effect(&mut self, kind: EffectKind, size: u32) -> bool {
        if size == 0 {
            log::warn!("Rejected effect size 0");
            return false;
        }
        let effects = EffectSettings {
            kind,
            size,
            ..self.effects
        };
        let changed = effects != self.effects;
        self.effects = effects;
        changed
    }

    pub fn next_page(&mut self) -> bool {
        if self.page_index + 1 >= self.document.len() {
            return false;
        }
        self.go_to_page(self.page_index + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        if self.page_index == 0 {
            return false;
        }
        self.go_to_page(self.page_index - 1)
    }

    /// Show another page. Selection is reset; history is untouched.
    pub fn go_to_page(&mut self, index: usize) -> bool {
        if index >= self.document.len() {
            log::warn!("Cannot go to page {}: document has {} page(s)", index, self.document.len());
            return false;
        }
        if index == self.page_index {
            return false;
        }
        self.page_index = index;
        self.selection.clear();
        self.pointer_position = None;
        log::debug!("Page: {}", index);
        true
    }

    /// Restore the state before the last committed edit.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.snapshot()) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Re-apply the last undone edit.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.snapshot()) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn set_canvas_bounds(&mut self, bounds: Rect) -> bool {
        if self.canvas_bounds == Some(bounds) {
            return false;
        }
        self.canvas_bounds = Some(bounds);
        true
    }

    // --- Internals -------------------------------------------------------

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            document: self.document.clone(),
            page_index: self.page_index,
            selection: self.selection.clone(),
        }
    }

    fn record(&mut self) {
        let snapshot = self.snapshot();
        self.history.record(snapshot);
    }

    /// Replace document and selection wholesale. Merge mode follows the
    /// restored selection so restored candidates stay usable.
    fn restore(&mut self, snapshot: Snapshot) {
        self.document = snapshot.document;
        self.page_index = snapshot
            .page_index
            .min(self.document.len().saturating_sub(1));
        self.selection = snapshot.selection;
        self.gesture = Gesture::Idle;
        if !self.selection.merge_set().is_empty() {
            self.mode = EditMode::Merge;
        } else if self.mode == EditMode::Merge {
            self.mode = EditMode::Normal;
        }
    }

    fn current_panel_mut(&mut self, index: usize) -> Option<&mut PanelRect> {
        self.document
            .page_mut(self.page_index)
            .and_then(|page| page.panels.get_mut(index))
    }
}

/// Rectangle spanned by a draw drag, kept inside the page.
fn drawn_rect(start: (i32, i32), current: (i32, i32), page_width: i32, page_height: i32) -> PanelRect {
    let x = start.0.min(current.0);
    let y = start.1.min(current.1);
    let width = (current.0 - start.0).abs().min(page_width - x).max(0);
    let height = (current.1 - start.1).abs().min(page_height - y).max(0);
    PanelRect::new(x, y, width, height)
}
