/*
 * The selection set: the record ids the user has chosen for download. It is
 * deliberately decoupled from the filter state; filtering changes what is
 * visible, never what is selected, so hidden selections survive arbitrary
 * filter and sort changes. The header checkbox's tri-state is derived from
 * comparing the filtered view's ids against this set, never stored.
 */
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    ids: HashSet<usize>,
}

impl SelectionSet {
    pub fn new() -> Self {
        SelectionSet {
            ids: HashSet::new(),
        }
    }

    pub fn contains(&self, id: usize) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn set_selected(&mut self, id: usize, is_selected: bool) {
        if is_selected {
            self.ids.insert(id);
        } else {
            self.ids.remove(&id);
        }
        log::debug!("SelectionSet: id {id} -> selected={is_selected} ({} total)", self.ids.len());
    }

    /// Adds every given id; used by "select all shown".
    pub fn add_all<I: IntoIterator<Item = usize>>(&mut self, ids: I) {
        self.ids.extend(ids);
        log::debug!("SelectionSet: add_all -> {} total", self.ids.len());
    }

    /// Removes only the given ids (the currently visible ones), leaving any
    /// hidden selections untouched. Used when the header checkbox is
    /// manually unchecked.
    pub fn remove_all<'a, I: IntoIterator<Item = &'a usize>>(&mut self, ids: I) {
        for id in ids {
            self.ids.remove(id);
        }
        log::debug!("SelectionSet: remove_all -> {} total", self.ids.len());
    }

    /// Drops every selection, including ones not currently visible.
    pub fn clear(&mut self) {
        log::debug!("SelectionSet: clearing {} selections", self.ids.len());
        self.ids.clear();
    }

    pub fn iter(&self) -> std::collections::hash_set::Iter<'_, usize> {
        self.ids.iter()
    }

    /// The selected ids in ascending order. The set itself is unordered, so
    /// consumers needing determinism (script generation) use this.
    pub fn ids_ascending(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// The derived state of the results header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCheckState {
    Checked,
    Indeterminate,
    Unchecked,
}

/*
 * Derives the header checkbox state from the visible ids and the selection:
 * every visible id selected (and at least one visible) is Checked, a nonempty
 * but partial overlap is Indeterminate, no overlap (or an empty view) is
 * Unchecked.
 */
pub fn header_check_state(visible_ids: &[usize], selection: &SelectionSet) -> HeaderCheckState {
    if visible_ids.is_empty() {
        return HeaderCheckState::Unchecked;
    }
    let selected_count = visible_ids
        .iter()
        .filter(|id| selection.contains(**id))
        .count();
    if selected_count == visible_ids.len() {
        HeaderCheckState::Checked
    } else if selected_count > 0 {
        HeaderCheckState::Indeterminate
    } else {
        HeaderCheckState::Unchecked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_selected_and_toggle_off() {
        let mut selection = SelectionSet::new();
        selection.set_selected(3, true);
        selection.set_selected(5, true);
        assert!(selection.contains(3));
        assert_eq!(selection.len(), 2);

        selection.set_selected(3, false);
        assert!(!selection.contains(3));
        assert!(selection.contains(5));
    }

    #[test]
    fn test_remove_all_leaves_hidden_selections() {
        let mut selection = SelectionSet::new();
        selection.add_all([1, 2, 7]);

        // Only ids 1 and 2 are visible; unchecking the header removes just those.
        let visible = vec![1, 2, 4];
        selection.remove_all(&visible);

        assert!(!selection.contains(1));
        assert!(!selection.contains(2));
        assert!(selection.contains(7), "hidden selection must survive");
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut selection = SelectionSet::new();
        selection.add_all([1, 9, 4]);
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_ids_ascending() {
        let mut selection = SelectionSet::new();
        selection.add_all([9, 0, 4]);
        assert_eq!(selection.ids_ascending(), vec![0, 4, 9]);
    }

    #[test]
    fn test_header_check_state_tri_state() {
        let mut selection = SelectionSet::new();
        let visible = vec![1, 2, 3];

        assert_eq!(
            header_check_state(&visible, &selection),
            HeaderCheckState::Unchecked
        );

        selection.set_selected(2, true);
        assert_eq!(
            header_check_state(&visible, &selection),
            HeaderCheckState::Indeterminate
        );

        selection.add_all([1, 3]);
        assert_eq!(
            header_check_state(&visible, &selection),
            HeaderCheckState::Checked
        );

        // A selection entirely outside the view reads as unchecked.
        let other_view = vec![8, 9];
        assert_eq!(
            header_check_state(&other_view, &selection),
            HeaderCheckState::Unchecked
        );
    }

    #[test]
    fn test_header_check_state_empty_view() {
        let mut selection = SelectionSet::new();
        selection.set_selected(1, true);
        assert_eq!(
            header_check_state(&[], &selection),
            HeaderCheckState::Unchecked
        );
    }
}
