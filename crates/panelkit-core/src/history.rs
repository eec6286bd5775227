//! Snapshot-based undo/redo.

use crate::document::Document;
use crate::selection::SelectionState;

/// Maximum number of undo steps kept by default.
pub const MAX_UNDO_HISTORY: usize = 50;

/// Deep copy of everything an undo step restores.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub document: Document,
    pub page_index: usize,
    pub selection: SelectionState,
}

/// Linear undo/redo timeline.
///
/// `entries[..cursor]` are undo targets, oldest first. When `cursor` is below
/// `entries.len()`, `entries[cursor]` is the state currently shown and
/// everything after it can be redone.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Snapshot>,
    cursor: usize,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(MAX_UNDO_HISTORY)
    }
}

impl History {
    /// Create an empty history keeping at most `capacity` undo steps.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record the state as it was just before a committed edit.
    pub fn record(&mut self, before: Snapshot) {
        self.entries.truncate(self.cursor);
        self.entries.push(before);
        if self.entries.len() > self.capacity {
            let excess = self.entries.len() - self.capacity;
            self.entries.drain(..excess);
        }
        self.cursor = self.entries.len();
        log::debug!("History: recorded, {} undo step(s)", self.cursor);
    }

    /// Step back. `live` is the state being replaced; it becomes the redo target.
    pub fn undo(&mut self, live: Snapshot) -> Option<Snapshot> {
        if self.cursor == 0 {
            return None;
        }
        if self.cursor == self.entries.len() {
            self.entries.push(live);
        } else {
            self.entries[self.cursor] = live;
        }
        self.cursor -= 1;
        log::debug!("History: undo, {} step(s) left", self.cursor);
        Some(self.entries[self.cursor].clone())
    }

    /// Step forward. `live` replaces the current entry so it can be undone to again.
    pub fn redo(&mut self, live: Snapshot) -> Option<Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.entries[self.cursor] = live;
        self.cursor += 1;
        log::debug!("History: redo, {} step(s) left", self.redo_depth());
        Some(self.entries[self.cursor].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of available undo steps.
    pub fn undo_depth(&self) -> usize {
        self.cursor
    }

    /// Number of available redo steps.
    pub fn redo_depth(&self) -> usize {
        self.entries.len().saturating_sub(self.cursor + 1)
    }

    /// Forget all steps, e.g. after loading a new document.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Page, PageSize};
    use crate::geometry::PanelRect;

    fn snapshot(panels: usize) -> Snapshot {
        let page = Page::new("p.jpg", PageSize::new(1000, 1000))
            .with_panels((0..panels).map(|i| PanelRect::new(i as i32, 0, 10, 10)).collect());
        Snapshot {
            document: Document::new(vec![page]),
            page_index: 0,
            selection: SelectionState::new(),
        }
    }

    fn panel_count(snapshot: &Snapshot) -> usize {
        snapshot.document.panel_count()
    }

    #[test]
    fn test_empty_history() {
        let mut history = History::default();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo(snapshot(0)).is_none());
        assert!(history.redo(snapshot(0)).is_none());
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut history = History::default();
        history.record(snapshot(0));
        history.record(snapshot(1));
        // live state has 2 panels

        let restored = history.undo(snapshot(2)).unwrap();
        assert_eq!(panel_count(&restored), 1);
        let restored = history.undo(restored).unwrap();
        assert_eq!(panel_count(&restored), 0);
        assert!(!history.can_undo());

        let restored = history.redo(restored).unwrap();
        assert_eq!(panel_count(&restored), 1);
        let restored = history.redo(restored).unwrap();
        assert_eq!(panel_count(&restored), 2);
        assert!(!history.can_redo());
        assert_eq!(history.undo_depth(), 2);
    }

    #[test]
    fn test_record_discards_redo() {
        let mut history = History::default();
        history.record(snapshot(0));
        history.record(snapshot(1));
        let restored = history.undo(snapshot(2)).unwrap();
        assert!(history.can_redo());

        history.record(restored);
        assert!(!history.can_redo());
        assert_eq!(history.undo_depth(), 2);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = History::new(3);
        for i in 0..5 {
            history.record(snapshot(i));
        }
        assert_eq!(history.undo_depth(), 3);

        let mut live = snapshot(5);
        let mut steps = 0;
        while let Some(restored) = history.undo(live.clone()) {
            live = restored;
            steps += 1;
        }
        assert_eq!(steps, 3);
        assert_eq!(panel_count(&live), 2);
    }

    #[test]
    fn test_clear() {
        let mut history = History::default();
        history.record(snapshot(0));
        history.clear();
        assert!(!history.can_undo());
        assert_eq!(history.capacity(), MAX_UNDO_HISTORY);
    }
}
