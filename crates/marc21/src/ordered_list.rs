//! Ordered list with stable element handles and contiguous positions.
//!
//! Elements are stored in display order in `entries`, each paired with its
//! handle. A handle names a slot in `slots`, which records the element's
//! current index into `entries`. Inserting, deleting or moving an element is
//! a splice over `entries` followed by a renumbering pass, so every live
//! element's stored position always equals its index.
//!
//! Complexity (n = number of live elements):
//! - `append`:                    O(1) amortised
//! - `prepend` / `insert_relative` / `move_relative`: O(n)
//! - `delete`:                    O(n)
//! - `position` / `get`:          O(1)
//!
//! Deleted slots go on a free list and are reused under a bumped
//! generation, so a stale [`ElementId`] stops resolving. Each list (and
//! each clone of one) draws a distinct identity from a global counter, and
//! handles minted by one list never resolve in another.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{ErrorKind, MarcError};

static NEXT_LIST: AtomicU64 = AtomicU64::new(1);

fn next_list() -> u64 {
    NEXT_LIST.fetch_add(1, Ordering::Relaxed)
}

/// Stable handle to an element of an [`OrderedList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId {
    list: u64,
    slot: usize,
    generation: u32,
}

/// Where to place an element relative to an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InsertMode {
    Before,
    #[default]
    After,
}

impl InsertMode {
    fn parse(mode: &str) -> Option<Self> {
        if mode.eq_ignore_ascii_case("before") {
            Some(InsertMode::Before)
        } else if mode.eq_ignore_ascii_case("after") {
            Some(InsertMode::After)
        } else {
            None
        }
    }

    /// Parses a field insert mode (`before` / `after`).
    pub fn parse_field_mode(mode: &str) -> Result<Self, MarcError> {
        Self::parse(mode).ok_or_else(|| MarcError::new(ErrorKind::InsertFieldMode, &[("mode", mode)]))
    }

    /// Parses a subfield insert mode (`before` / `after`).
    pub fn parse_subfield_mode(mode: &str) -> Result<Self, MarcError> {
        Self::parse(mode)
            .ok_or_else(|| MarcError::new(ErrorKind::InsertSubfieldMode, &[("mode", mode)]))
    }
}

impl FromStr for InsertMode {
    type Err = MarcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_field_mode(s)
    }
}

impl fmt::Display for InsertMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertMode::Before => f.write_str("before"),
            InsertMode::After => f.write_str("after"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    generation: u32,
    position: Option<usize>,
}

/// Ordered container assigning a contiguous 0-based position to each element.
pub struct OrderedList<T> {
    list: u64,
    slots: Vec<Slot>,
    free: Vec<usize>,
    entries: Vec<(ElementId, T)>,
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A clone is a new list: same elements in the same order, fresh handles.
impl<T: Clone> Clone for OrderedList<T> {
    fn clone(&self) -> Self {
        self.values().cloned().collect()
    }
}

impl<T> OrderedList<T> {
    pub fn new() -> Self {
        Self {
            list: next_list(),
            slots: Vec::new(),
            free: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn alloc(&mut self, position: usize) -> ElementId {
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot].position = Some(position);
                slot
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    position: Some(position),
                });
                self.slots.len() - 1
            }
        };
        ElementId {
            list: self.list,
            slot,
            generation: self.slots[slot].generation,
        }
    }

    fn release(&mut self, id: ElementId) {
        let slot = &mut self.slots[id.slot];
        slot.position = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.slot);
    }

    fn renumber(&mut self, from: usize) {
        for (position, (id, _)) in self.entries.iter().enumerate().skip(from) {
            self.slots[id.slot].position = Some(position);
        }
    }

    /// Places `value` at the tail; its position is the previous length.
    pub fn append(&mut self, value: T) -> ElementId {
        let id = self.alloc(self.entries.len());
        self.entries.push((id, value));
        id
    }

    /// Places `value` at the head and renumbers every element.
    pub fn prepend(&mut self, value: T) -> ElementId {
        let id = self.alloc(0);
        self.entries.insert(0, (id, value));
        self.renumber(1);
        id
    }

    /// Places `value` immediately before or after `anchor`.
    ///
    /// When `anchor` is not a live member the list is left untouched and
    /// `value` is handed back.
    pub fn insert_relative(
        &mut self,
        value: T,
        anchor: ElementId,
        mode: InsertMode,
    ) -> Result<ElementId, T> {
        let Some(anchor_pos) = self.position(anchor) else {
            return Err(value);
        };
        let at = match mode {
            InsertMode::Before => anchor_pos,
            InsertMode::After => anchor_pos + 1,
        };
        let id = self.alloc(at);
        self.entries.insert(at, (id, value));
        self.renumber(at + 1);
        Ok(id)
    }

    /// Removes an element; every later element moves up one position.
    pub fn delete(&mut self, id: ElementId) -> Option<T> {
        let position = self.position(id)?;
        let (_, value) = self.entries.remove(position);
        self.release(id);
        self.renumber(position);
        Some(value)
    }

    /// Moves `id` to sit before or after `anchor`.
    ///
    /// Returns `false` (and changes nothing) unless both are live members.
    pub fn move_relative(&mut self, id: ElementId, anchor: ElementId, mode: InsertMode) -> bool {
        let (Some(from), Some(anchor_pos)) = (self.position(id), self.position(anchor)) else {
            return false;
        };
        if id == anchor {
            return true;
        }
        let entry = self.entries.remove(from);
        let anchor_pos = if anchor_pos > from {
            anchor_pos - 1
        } else {
            anchor_pos
        };
        let at = match mode {
            InsertMode::Before => anchor_pos,
            InsertMode::After => anchor_pos + 1,
        };
        self.entries.insert(at, entry);
        self.renumber(from.min(at));
        true
    }

    /// Current 0-based position of `id`.
    pub fn position(&self, id: ElementId) -> Option<usize> {
        if id.list != self.list {
            return None;
        }
        let slot = self.slots.get(id.slot)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.position
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: ElementId) -> Option<&T> {
        let position = self.position(id)?;
        self.entries.get(position).map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut T> {
        let position = self.position(id)?;
        self.entries.get_mut(position).map(|(_, value)| value)
    }

    /// Handle of the element at `position`.
    pub fn id_at(&self, position: usize) -> Option<ElementId> {
        self.entries.get(position).map(|&(id, _)| id)
    }

    /// Element at `position`.
    pub fn at(&self, position: usize) -> Option<&T> {
        self.entries.get(position).map(|(_, value)| value)
    }

    pub fn first(&self) -> Option<&T> {
        self.at(0)
    }

    pub fn last(&self) -> Option<&T> {
        self.entries.last().map(|(_, value)| value)
    }

    /// Iterates `(handle, element)` pairs in order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            entries: self.entries.iter(),
        }
    }

    /// Iterates handles in order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.entries.iter().map(|&(id, _)| id)
    }

    /// Iterates elements in order.
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Iterates elements mutably in order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.entries.iter_mut().map(|(_, value)| value)
    }
}

/// Ordered iterator over `(ElementId, &T)`.
pub struct Iter<'a, T> {
    entries: std::slice::Iter<'a, (ElementId, T)>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (ElementId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(id, value)| (*id, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a OrderedList<T> {
    type Item = (ElementId, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator over the elements in order.
pub struct IntoIter<T> {
    entries: std::vec::IntoIter<(ElementId, T)>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.entries.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<T> IntoIterator for OrderedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            entries: self.entries.into_iter(),
        }
    }
}

impl<T> FromIterator<T> for OrderedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = OrderedList::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for OrderedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

/// Lists compare by their elements in order; handles are not compared.
impl<T: PartialEq> PartialEq for OrderedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.values().eq(other.values())
    }
}

impl<T: Eq> Eq for OrderedList<T> {}

impl<T: fmt::Debug> fmt::Debug for OrderedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values()).finish()
    }
}
