//! Ordered in-memory collections, one per entity.
//!
//! A [`Store`] keeps records in insertion order, which is also the order every
//! listing returns. Lookups are linear scans; collections are small and the
//! order matters more than lookup speed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, RosterError};
use crate::model::Entity;
use crate::query::{Filter, Queryable};
use crate::transition::Lifecycle;

/// A record that lives in a [`Store`].
pub trait Record {
    /// The closed status enum for this entity.
    type Status: Lifecycle;

    /// Which collection this record belongs to.
    const ENTITY: Entity;

    fn id(&self) -> &str;

    fn status(&self) -> Self::Status;

    /// Write the status field. Callers go through [`Store::transition`] so the
    /// lifecycle table is checked first.
    fn set_status(&mut self, status: Self::Status);
}

/// Ordered collection of records keyed by their string ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Store<T> {
    records: Vec<T>,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> Store<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing records, rejecting duplicate IDs.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Conflict`] naming the first repeated ID.
    pub fn from_records(records: Vec<T>) -> Result<Self> {
        let mut store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    /// All IDs in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.records.iter().map(Record::id).collect()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.records.iter_mut().find(|record| record.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Fetch a record or fail with a typed not-found error.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] when no record has this ID.
    pub fn require(&self, id: &str) -> Result<&T> {
        self.get(id)
            .ok_or_else(|| RosterError::not_found(T::ENTITY, id))
    }

    /// Append a new record.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Conflict`] if the ID is already taken.
    pub fn insert(&mut self, record: T) -> Result<()> {
        if self.contains(record.id()) {
            return Err(RosterError::Conflict {
                entity: T::ENTITY,
                id: record.id().to_string(),
            });
        }
        debug!(entity = %T::ENTITY, id = record.id(), "insert");
        self.records.push(record);
        Ok(())
    }

    /// Replace the record with the same ID in place, or append it.
    ///
    /// Returns `true` when an existing record was replaced.
    pub fn upsert(&mut self, record: T) -> bool {
        if let Some(slot) = self.get_mut(record.id()) {
            debug!(entity = %T::ENTITY, id = record.id(), "upsert replace");
            *slot = record;
            true
        } else {
            debug!(entity = %T::ENTITY, id = record.id(), "upsert append");
            self.records.push(record);
            false
        }
    }

    /// Mutate one record in place.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] when no record has this ID.
    pub fn update<F>(&mut self, id: &str, apply: F) -> Result<&T>
    where
        F: FnOnce(&mut T),
    {
        let record = self
            .get_mut(id)
            .ok_or_else(|| RosterError::not_found(T::ENTITY, id))?;
        apply(&mut *record);
        Ok(record)
    }

    /// Check that `id` exists and may move to `target`, without writing.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] or [`RosterError::InvalidTransition`].
    pub fn check_transition(&self, id: &str, target: T::Status) -> Result<()> {
        let record = self.require(id)?;
        record
            .status()
            .can_transition_to(target)
            .map_err(|err| RosterError::InvalidTransition {
                entity: T::ENTITY,
                id: id.to_string(),
                from: err.from.to_string(),
                to: err.to.to_string(),
                reason: err.reason,
            })
    }

    /// Validated status write. Returns the previous status.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] or [`RosterError::InvalidTransition`];
    /// the record is untouched on error.
    pub fn transition(&mut self, id: &str, target: T::Status) -> Result<T::Status> {
        self.check_transition(id, target)?;
        let record = self
            .get_mut(id)
            .ok_or_else(|| RosterError::not_found(T::ENTITY, id))?;
        let previous = record.status();
        record.set_status(target);
        debug!(entity = %T::ENTITY, id, from = %previous, to = %target, "transition");
        Ok(previous)
    }

    /// First ID that appears more than once, if any.
    #[must_use]
    pub fn duplicate_id(&self) -> Option<&str> {
        let mut seen = std::collections::HashSet::new();
        self.records
            .iter()
            .map(Record::id)
            .find(|id| !seen.insert(*id))
    }
}

impl<T: Queryable> Store<T> {
    /// Records matching `filter`, in insertion order.
    #[must_use]
    pub fn list(&self, filter: &Filter<T::Status>) -> Vec<&T> {
        filter.apply(self.records.iter())
    }

    /// IDs of the records matching `filter`, in insertion order.
    #[must_use]
    pub fn visible_ids(&self, filter: &Filter<T::Status>) -> Vec<String> {
        self.list(filter)
            .into_iter()
            .map(|record| record.id().to_string())
            .collect()
    }
}

impl<'a, T> IntoIterator for &'a Store<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
