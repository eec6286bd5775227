//! Panel selection: a single active panel or a set of merge candidates.

use crate::input::Modifiers;

/// Which panels on the current page are selected.
///
/// Outside of mode switches, at most one of `active` and `merge_set` is in use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Single selection (Normal and Draw modes).
    active: Option<usize>,
    /// Merge candidates in selection order, without duplicates.
    merge_set: Vec<usize>,
}

impl SelectionState {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a selection from its parts.
    pub fn from_parts(active: Option<usize>, merge_set: Vec<usize>) -> Self {
        let mut selection = Self {
            active,
            merge_set: Vec::with_capacity(merge_set.len()),
        };
        for index in merge_set {
            selection.insert_candidate(index);
        }
        selection
    }

    /// The active panel index, if any.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Merge candidates in selection order.
    pub fn merge_set(&self) -> &[usize] {
        &self.merge_set
    }

    /// Merge candidates in ascending order.
    pub fn merge_indices_sorted(&self) -> Vec<usize> {
        let mut indices = self.merge_set.clone();
        indices.sort_unstable();
        indices
    }

    /// Check if a panel is a merge candidate.
    pub fn is_merge_candidate(&self, index: usize) -> bool {
        self.merge_set.contains(&index)
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.active.is_none() && self.merge_set.is_empty()
    }

    /// Select a single panel (Normal-mode click).
    pub fn select(&mut self, index: usize) {
        self.active = Some(index);
        self.merge_set.clear();
    }

    /// Clear everything.
    pub fn clear(&mut self) {
        self.active = None;
        self.merge_set.clear();
    }

    /// Clear the active panel only.
    pub fn clear_active(&mut self) {
        self.active = None;
    }

    /// Apply a Merge-mode click on `index`.
    ///
    /// Ctrl/Cmd toggles membership, Shift (with a non-empty set) selects the
    /// range between `index` and the largest candidate, a plain click selects
    /// only `index`. The set is never left empty.
    pub fn merge_click(&mut self, index: usize, modifiers: Modifiers) {
        if modifiers.command() {
            if let Some(pos) = self.merge_set.iter().position(|&i| i == index) {
                self.merge_set.remove(pos);
            } else {
                self.merge_set.push(index);
            }
        } else if modifiers.shift && !self.merge_set.is_empty() {
            let anchor = self.merge_set.iter().copied().max().unwrap_or(index);
            let (start, end) = (anchor.min(index), anchor.max(index));
            self.merge_set = (start..=end).collect();
        } else {
            self.merge_set = vec![index];
        }

        if self.merge_set.is_empty() {
            self.merge_set.push(index);
        }
        self.active = None;
    }

    /// Move into Merge mode; an active panel becomes the only candidate.
    pub fn enter_merge(&mut self) {
        if let Some(index) = self.active.take() {
            self.merge_set = vec![index];
        }
    }

    /// Leave Merge mode, dropping all candidates.
    pub fn leave_merge(&mut self) {
        self.merge_set.clear();
    }

    /// Follow two panels whose positions were swapped.
    pub fn remap_swap(&mut self, a: usize, b: usize) {
        self.remap(|i| {
            if i == a {
                b
            } else if i == b {
                a
            } else {
                i
            }
        });
    }

    /// Follow panels that moved from index `i` to `new_index(i)`.
    pub fn remap(&mut self, new_index: impl Fn(usize) -> usize) {
        self.active = self.active.map(&new_index);
        for index in &mut self.merge_set {
            *index = new_index(*index);
        }
    }

    fn insert_candidate(&mut self, index: usize) {
        if !self.merge_set.contains(&index) {
            self.merge_set.push(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl() -> Modifiers {
        Modifiers {
            ctrl: true,
            ..Modifiers::default()
        }
    }

    fn shift() -> Modifiers {
        Modifiers {
            shift: true,
            ..Modifiers::default()
        }
    }

    #[test]
    fn test_single_select_clears_merge_set() {
        let mut selection = SelectionState::from_parts(None, vec![1, 2]);
        selection.select(3);
        assert_eq!(selection.active(), Some(3));
        assert!(selection.merge_set().is_empty());
    }

    #[test]
    fn test_plain_merge_click_replaces() {
        let mut selection = SelectionState::from_parts(None, vec![1, 2]);
        selection.merge_click(4, Modifiers::default());
        assert_eq!(selection.merge_set(), &[4]);
        assert_eq!(selection.active(), None);
    }

    #[test]
    fn test_ctrl_click_toggles() {
        let mut selection = SelectionState::new();
        selection.merge_click(1, Modifiers::default());
        selection.merge_click(3, ctrl());
        assert_eq!(selection.merge_set(), &[1, 3]);

        selection.merge_click(1, ctrl());
        assert_eq!(selection.merge_set(), &[3]);

        let meta = Modifiers {
            meta: true,
            ..Modifiers::default()
        };
        selection.merge_click(5, meta);
        assert_eq!(selection.merge_set(), &[3, 5]);
    }

    #[test]
    fn test_ctrl_click_never_empties() {
        let mut selection = SelectionState::from_parts(None, vec![2]);
        selection.merge_click(2, ctrl());
        assert_eq!(selection.merge_set(), &[2]);
    }

    #[test]
    fn test_shift_click_ranges_to_max() {
        let mut selection = SelectionState::from_parts(None, vec![2, 5]);
        selection.merge_click(0, shift());
        assert_eq!(selection.merge_set(), &[0, 1, 2, 3, 4, 5]);

        let mut selection = SelectionState::from_parts(None, vec![5, 2]);
        selection.merge_click(7, shift());
        assert_eq!(selection.merge_set(), &[5, 6, 7]);
    }

    #[test]
    fn test_shift_click_on_empty_set_is_plain() {
        let mut selection = SelectionState::new();
        selection.merge_click(3, shift());
        assert_eq!(selection.merge_set(), &[3]);
    }

    #[test]
    fn test_enter_and_leave_merge() {
        let mut selection = SelectionState::new();
        selection.select(2);
        selection.enter_merge();
        assert_eq!(selection.active(), None);
        assert_eq!(selection.merge_set(), &[2]);

        selection.leave_merge();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_remap_swap() {
        let mut selection = SelectionState::new();
        selection.select(3);
        selection.remap_swap(3, 2);
        assert_eq!(selection.active(), Some(2));

        let mut selection = SelectionState::from_parts(None, vec![1, 2, 4]);
        selection.remap_swap(2, 3);
        assert_eq!(selection.merge_set(), &[1, 3, 4]);
        assert_eq!(selection.merge_indices_sorted(), vec![1, 3, 4]);
    }

    #[test]
    fn test_from_parts_dedups() {
        let selection = SelectionState::from_parts(None, vec![3, 1, 3]);
        assert_eq!(selection.merge_set(), &[3, 1]);
        assert!(selection.is_merge_candidate(1));
        assert!(!selection.is_merge_candidate(2));
    }
}
