//! De-duplicating collection of candidate update entries

use super::{Update, UpdateKey};
use std::collections::BTreeMap;

/// Update entries keyed by `(ecosystem, directory)`
///
/// Backed by an ordered map so that [`UpdateSet::to_ordered_list`] is stable
/// across runs regardless of filesystem walk order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSet {
    entries: BTreeMap<UpdateKey, Update>,
}

impl UpdateSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, replacing any entry with the same key
    pub fn add(&mut self, update: Update) {
        self.entries.insert(update.key(), update);
    }

    /// Removes the entry with the same key, if any
    ///
    /// Returns true if an entry was removed.
    pub fn remove_if_present(&mut self, update: &Update) -> bool {
        self.entries.remove(&update.key()).is_some()
    }

    /// Returns true if an entry with the same key is present
    pub fn contains(&self, update: &Update) -> bool {
        self.entries.contains_key(&update.key())
    }

    /// Returns the entries sorted by key
    pub fn to_ordered_list(&self) -> Vec<Update> {
        self.entries.values().cloned().collect()
    }

    /// Returns true if the set holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromIterator<Update> for UpdateSet {
    fn from_iter<I: IntoIterator<Item = Update>>(iter: I) -> Self {
        let mut set = UpdateSet::new();
        for update in iter {
            set.add(update);
        }
        set
    }
}
