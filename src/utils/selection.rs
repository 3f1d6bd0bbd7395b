//! Insertion-ordered ID selection backing the bulk-action checkboxes.

use std::collections::HashSet;
use std::hash::Hash;

/// A set of selected IDs that remembers the order they were picked in.
///
/// Batch operations iterate in this order, so re-selecting an ID that is
/// already present keeps its original position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<Id: Eq + Hash> {
    order: Vec<Id>,
    members: HashSet<Id>,
}

impl<Id: Eq + Hash> Default for Selection<Id> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            members: HashSet::new(),
        }
    }
}

impl<Id: Copy + Eq + Hash> Selection<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id`; returns `false` if it was already selected.
    pub fn insert(&mut self, id: Id) -> bool {
        if self.members.insert(id) {
            self.order.push(id);
            true
        } else {
            false
        }
    }

    pub fn remove(&mut self, id: Id) -> bool {
        if self.members.remove(&id) {
            self.order.retain(|existing| *existing != id);
            true
        } else {
            false
        }
    }

    /// Flips the checkbox for `id`; returns whether it is now selected.
    pub fn toggle(&mut self, id: Id) -> bool {
        if self.remove(id) {
            false
        } else {
            self.insert(id)
        }
    }

    /// Selects every ID in `ids` not already selected, in iteration order.
    pub fn select_all<I: IntoIterator<Item = Id>>(&mut self, ids: I) {
        for id in ids {
            self.insert(id);
        }
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    pub fn contains(&self, id: Id) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// IDs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Id> + '_ {
        self.order.iter().copied()
    }

    /// Drops selected IDs that are no longer present after a reload.
    pub fn retain_present<F: Fn(Id) -> bool>(&mut self, present: F) {
        self.order.retain(|id| present(*id));
        self.members.retain(|id| present(*id));
    }
}

impl<Id: Copy + Eq + Hash> FromIterator<Id> for Selection<Id> {
    fn from_iter<I: IntoIterator<Item = Id>>(iter: I) -> Self {
        let mut selection = Self::new();
        selection.select_all(iter);
        selection
    }
}
