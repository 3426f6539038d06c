//! Append-only list with stepped growth.

use std::collections::TryReserveError;

/// Outcome of [`AppendList::push`].
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appended {
    /// The item was stored.
    Stored,
    /// The list is at its ceiling; the item was discarded.
    Dropped,
}

/// A growable list that only ever appends.
///
/// Capacity grows by a fixed `increment` rather than doubling, and never past
/// the optional `ceiling`. Once the ceiling is reached further pushes are
/// dropped. Entries are never removed, reordered or deduplicated, so the
/// first of several equal entries is always the first one found by a scan.
///
/// ```rust
/// use auspex::store::{AppendList, Appended};
///
/// let mut list = AppendList::with_ceiling(2, 3);
/// for n in 0..3 {
///     assert_eq!(list.push(n).unwrap(), Appended::Stored);
/// }
/// assert_eq!(list.push(3).unwrap(), Appended::Dropped);
/// assert_eq!(list.as_slice(), &[0, 1, 2]);
/// assert_eq!(list.capacity(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct AppendList<T> {
    items: Vec<T>,
    capacity: usize,
    increment: usize,
    ceiling: Option<usize>,
}

impl<T> AppendList<T> {
    /// Creates an unbounded list growing by `increment` slots at a time.
    pub fn new(increment: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity: 0,
            increment: increment.max(1),
            ceiling: None,
        }
    }

    /// Creates a list growing by `increment` up to at most `ceiling` entries.
    pub fn with_ceiling(increment: usize, ceiling: usize) -> Self {
        Self {
            ceiling: Some(ceiling),
            ..Self::new(increment)
        }
    }

    /// Appends an item, growing the list by one step when it is full.
    ///
    /// # Errors
    ///
    /// Returns the allocation error if growing fails. Existing entries are
    /// untouched in that case.
    pub fn push(&mut self, item: T) -> Result<Appended, TryReserveError> {
        if self.items.len() >= self.capacity {
            let mut grown = self.capacity + self.increment;
            if let Some(ceiling) = self.ceiling {
                grown = grown.min(ceiling);
            }
            if self.items.len() >= grown {
                return Ok(Appended::Dropped);
            }
            self.items.try_reserve_exact(grown - self.items.len())?;
            self.capacity = grown;
        }

        self.items.push(item);
        Ok(Appended::Stored)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Logical capacity: the number of slots grown so far.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ceiling(&self) -> Option<usize> {
        self.ceiling
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a AppendList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
