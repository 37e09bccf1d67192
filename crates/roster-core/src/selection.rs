//! Bulk selection tracking.
//!
//! A [`Selection`] is a set of record IDs. It is never pruned when the visible
//! rows change; bulk actions that care about visibility go through
//! [`Selection::effective`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with exactly the visible IDs.
    pub fn select_all<I, S>(&mut self, visible: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = visible.into_iter().map(Into::into).collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Flip membership of one ID. Returns `true` if it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn select(&mut self, id: &str) {
        if !self.ids.contains(id) {
            self.ids.insert(id.to_string());
        }
    }

    pub fn deselect(&mut self, id: &str) {
        self.ids.remove(id);
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected IDs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Selected IDs that are still visible, in visible order.
    #[must_use]
    pub fn effective<'a, I>(&self, visible: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        visible
            .into_iter()
            .filter(|id| self.ids.contains(*id))
            .map(str::to_string)
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
