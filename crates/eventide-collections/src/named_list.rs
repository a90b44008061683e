//! Ordered storage of owned, named elements.
//!
//! A [`NamedElementList`] owns its elements and hands out stable [`ElementId`]
//! handles for them. Handles survive inserts, removals and moves of *other*
//! elements, which is what lets a [`FolderTree`](crate::FolderTree) point at
//! list elements without borrowing them.

use std::fmt;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// Anything that can be stored in a [`NamedElementList`].
pub trait Named {
    /// The name under which the element is looked up.
    fn name(&self) -> &str;

    /// Renames the element in place.
    fn set_name(&mut self, name: String);
}

/// Stable handle to one element of a [`NamedElementList`].
///
/// Ids are never reused within a list, so a handle to a removed element
/// simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    id: ElementId,
    value: T,
}

/// An ordered sequence of owned, named elements.
///
/// # Uniqueness
///
/// Names are expected to be unique, but the list does **not** enforce it:
/// [`insert`](Self::insert), [`insert_new`](Self::insert_new) and
/// [`rename`](Self::rename) accept a name that is already taken. Callers that
/// need uniqueness check with [`has`](Self::has) first or generate a free name
/// with [`unique_name`](crate::unique_name). Lookups by name return the first
/// element carrying that name.
///
/// Cloning the list deep-copies every element and keeps their ids, so a
/// cloned folder tree stays valid against the cloned list.
#[derive(Clone)]
pub struct NamedElementList<T> {
    slots: Vec<Slot<T>>,
    next_id: u32,
}

impl<T> Default for NamedElementList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for NamedElementList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.slots.iter().map(|slot| &slot.value)).finish()
    }
}

impl<T> NamedElementList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_id: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn allocate_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Inserts `value` at `position`, or at the end when `position` is past the
    /// last element (pass `usize::MAX` to append).
    ///
    /// Preconditions: none. The name of `value` is not checked against the
    /// names already present.
    /// Postconditions: the element is stored at `min(position, len)` and its
    /// fresh handle is returned.
    pub fn insert(&mut self, value: T, position: usize) -> ElementId {
        let id = self.allocate_id();
        let slot = Slot { id, value };
        if position < self.slots.len() {
            self.slots.insert(position, slot);
        } else {
            self.slots.push(slot);
        }
        id
    }

    /// Appends `value` at the end of the list.
    pub fn push(&mut self, value: T) -> ElementId {
        self.insert(value, usize::MAX)
    }

    pub fn get_at(&self, index: usize) -> Option<&T> {
        self.slots.get(index).map(|slot| &slot.value)
    }

    pub fn get_at_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).map(|slot| &mut slot.value)
    }

    pub fn get_by_id(&self, id: ElementId) -> Option<&T> {
        self.slots.iter().find(|slot| slot.id == id).map(|slot| &slot.value)
    }

    pub fn get_by_id_mut(&mut self, id: ElementId) -> Option<&mut T> {
        self.slots
            .iter_mut()
            .find(|slot| slot.id == id)
            .map(|slot| &mut slot.value)
    }

    pub fn id_at(&self, index: usize) -> Option<ElementId> {
        self.slots.get(index).map(|slot| slot.id)
    }

    pub fn contains_id(&self, id: ElementId) -> bool {
        self.slots.iter().any(|slot| slot.id == id)
    }

    pub fn position_of_id(&self, id: ElementId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.id == id)
    }

    /// Position of `element` in the list, compared by identity.
    ///
    /// Returns `None` for a value that is not stored in this list, even if an
    /// equal value is.
    pub fn position_of(&self, element: &T) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| std::ptr::eq(&slot.value, element))
    }

    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index < self.slots.len() {
            Some(self.slots.remove(index).value)
        } else {
            None
        }
    }

    pub fn remove_by_id(&mut self, id: ElementId) -> Option<T> {
        let index = self.position_of_id(id)?;
        self.remove_at(index)
    }

    /// Moves the element at `old_index` so that it ends up at `new_index`.
    ///
    /// Out-of-range indices leave the list untouched.
    pub fn move_element(&mut self, old_index: usize, new_index: usize) -> bool {
        if old_index >= self.slots.len() || new_index >= self.slots.len() {
            return false;
        }
        let slot = self.slots.remove(old_index);
        self.slots.insert(new_index, slot);
        true
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.slots.iter().map(|slot| &slot.value)
    }

    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut T> + '_ {
        self.slots.iter_mut().map(|slot| &mut slot.value)
    }

    /// Iterates elements together with their handles, in list order.
    pub fn iter_with_ids(&self) -> impl DoubleEndedIterator<Item = (ElementId, &T)> + '_ {
        self.slots.iter().map(|slot| (slot.id, &slot.value))
    }

    pub fn ids(&self) -> impl DoubleEndedIterator<Item = ElementId> + '_ {
        self.slots.iter().map(|slot| slot.id)
    }
}

impl<T: Named> NamedElementList<T> {
    /// Inserts a default-constructed element named `name` at `position`.
    ///
    /// Same uniqueness caveat as [`insert`](Self::insert).
    pub fn insert_new(&mut self, name: &str, position: usize) -> ElementId
    where
        T: Default,
    {
        let mut value = T::default();
        value.set_name(name.to_string());
        self.insert(value, position)
    }

    pub fn has(&self, name: &str) -> bool {
        self.position_of_name(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.slots
            .iter()
            .find(|slot| slot.value.name() == name)
            .map(|slot| &slot.value)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.slots
            .iter_mut()
            .find(|slot| slot.value.name() == name)
            .map(|slot| &mut slot.value)
    }

    pub fn position_of_name(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.value.name() == name)
    }

    pub fn id_of(&self, name: &str) -> Option<ElementId> {
        self.slots
            .iter()
            .find(|slot| slot.value.name() == name)
            .map(|slot| slot.id)
    }

    pub fn name_of_id(&self, id: ElementId) -> Option<&str> {
        self.get_by_id(id).map(Named::name)
    }

    /// Removes the first element named `name` and returns it.
    pub fn remove(&mut self, name: &str) -> Option<T> {
        let index = self.position_of_name(name)?;
        self.remove_at(index)
    }

    /// Renames the first element named `old_name`.
    ///
    /// Returns `false` when no element carries `old_name`. Whether `new_name`
    /// is already taken is the caller's concern.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> bool {
        match self.get_mut(old_name) {
            Some(element) => {
                element.set_name(new_name.to_string());
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots.iter().map(|slot| slot.value.name())
    }
}

/// Lists are equal when they hold equal elements in the same order; element
/// ids are not compared.
impl<T: PartialEq> PartialEq for NamedElementList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T> FromIterator<T> for NamedElementList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.push(value);
        }
        list
    }
}

impl<T> From<Vec<T>> for NamedElementList<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Serialize> Serialize for NamedElementList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.slots.len()))?;
        for slot in &self.slots {
            seq.serialize_element(&slot.value)?;
        }
        seq.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for NamedElementList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<T>::deserialize(deserializer)?;
        Ok(values.into())
    }
}
