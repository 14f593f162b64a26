//! An ordered collection of entities with stable identities
//!
//! This is the same store for reminders, caregivers and locations: items are kept in insertion order, and replaced in place when updated.

use std::iter::FromIterator;

use serde::{Deserialize, Serialize};

use crate::traits::Entity;


/// Tells what [`Collection::upsert`] did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Upserted {
    /// An item with the same id existed, and has been replaced at the same position
    Replaced,
    /// This is a new item, that has been added at the end of the collection
    Appended,
}

/// A list of entities, persisted as a plain JSON array
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<E> {
    items: Vec<E>,
}

impl<E> Default for Collection<E> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<E: Entity> Collection<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the item that has the same id, or append it if it is new
    pub fn upsert(&mut self, item: E) -> Upserted {
        match self.position(item.id()) {
            Some(index) => {
                self.items[index] = item;
                Upserted::Replaced
            },
            None => {
                self.items.push(item);
                Upserted::Appended
            },
        }
    }

    /// Remove the item with this id.
    /// Returns whether something was actually removed (removing an unknown id is fine)
    pub fn remove(&mut self, id: &E::Id) -> bool {
        let len_before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != len_before
    }

    pub fn get(&self, id: &E::Id) -> Option<&E> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn get_mut(&mut self, id: &E::Id) -> Option<&mut E> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &E::Id) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: &E::Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn first(&self) -> Option<&E> {
        self.items.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<E: Entity> FromIterator<E> for Collection<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

impl<'a, E> IntoIterator for &'a Collection<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
