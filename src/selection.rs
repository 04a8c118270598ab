//! # Selection Set
//!
//! Tracks which record identifiers are chosen for the next batch operation. The set holds
//! identifiers only, never record copies, so a catalog refresh cannot desynchronize it: an
//! identifier without a matching record is simply inert.

use crate::models::RecordId;
use std::collections::HashSet;

/// Insertion-ordered set of record identifiers
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    order: Vec<RecordId>,
    members: HashSet<RecordId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns whether the id is selected afterwards.
    pub fn toggle(&mut self, id: RecordId) -> bool {
        if self.members.remove(&id) {
            self.order.retain(|existing| *existing != id);
            false
        } else {
            self.members.insert(id);
            self.order.push(id);
            true
        }
    }

    /// Replace the set with exactly the given identifiers (not additive).
    ///
    /// Duplicates in `ids` collapse onto their first occurrence.
    pub fn select_all<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = RecordId>,
    {
        self.clear();
        for id in ids {
            if self.members.insert(id) {
                self.order.push(id);
            }
        }
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Identifiers in insertion order
    pub fn ids(&self) -> &[RecordId] {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_membership() {
        let mut selection = SelectionSet::new();
        assert!(selection.toggle(RecordId(1)));
        assert!(selection.contains(RecordId(1)));
        assert!(!selection.toggle(RecordId(1)));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_replaces_rather_than_adds() {
        let mut selection = SelectionSet::new();
        selection.toggle(RecordId(9));
        selection.select_all([RecordId(1), RecordId(2), RecordId(1)]);
        assert_eq!(selection.ids(), &[RecordId(1), RecordId(2)]);
        assert!(!selection.contains(RecordId(9)));
    }

    #[test]
    fn test_insertion_order_survives_toggle_off() {
        let mut selection = SelectionSet::new();
        for id in [3, 1, 2] {
            selection.toggle(RecordId(id));
        }
        selection.toggle(RecordId(1));
        selection.toggle(RecordId(1));
        assert_eq!(selection.ids(), &[RecordId(3), RecordId(2), RecordId(1)]);
    }

    #[test]
    fn test_clear_empties() {
        let mut selection = SelectionSet::new();
        selection.select_all([RecordId(4), RecordId(5)]);
        selection.clear();
        assert_eq!(selection.len(), 0);
        assert!(!selection.contains(RecordId(4)));
    }
}
