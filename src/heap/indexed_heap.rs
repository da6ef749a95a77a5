use std::{
    cmp::Ordering,
    collections::hash_map::RandomState,
    fmt::{self, Debug},
    hash::{BuildHasher, Hash},
};

use super::{
    alist::{AList, AListError},
    entry::Entry,
    hash_table::{self, HashTable},
    HeapError,
};

/// Array capacity used by [`IndexedHeap::new`].
pub const DEFAULT_ARRAY_CAPACITY: usize = 10;

/// A min-heap of distinct values, each carrying a priority, that can look
/// up and reprioritise any value it holds.
///
/// The array stores the heap as a complete binary tree: the children of
/// slot `i` are `2i + 1` and `2i + 2`. The index maps every live value to
/// the slot it currently occupies, and every relocation in the array is
/// mirrored in the index before the operation returns.
pub struct IndexedHeap<V, P, S = RandomState> {
    entries: AList<Entry<V, P>>,
    index: HashTable<V, usize, S>,
}

impl<V, P> IndexedHeap<V, P, RandomState>
where
    V: Hash + Eq + Clone,
    P: Ord,
{
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ARRAY_CAPACITY, hash_table::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(array_capacity: usize, index_capacity: usize) -> Self {
        Self::with_capacity_and_hasher(array_capacity, index_capacity, RandomState::new())
    }
}

impl<V, P> Default for IndexedHeap<V, P, RandomState>
where
    V: Hash + Eq + Clone,
    P: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P, S> IndexedHeap<V, P, S>
where
    V: Hash + Eq + Clone,
    P: Ord,
    S: BuildHasher,
{
    pub fn with_capacity_and_hasher(array_capacity: usize, index_capacity: usize, hasher: S) -> Self {
        Self {
            entries: AList::with_capacity(array_capacity),
            index: HashTable::with_capacity_and_hasher(index_capacity, hasher),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Slots in the backing array.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Buckets in the value index.
    pub fn index_capacity(&self) -> usize {
        self.index.capacity()
    }

    /// The value with the lowest priority.
    pub fn peek(&self) -> Result<&V, HeapError> {
        Ok(&self.root()?.value)
    }

    pub fn peek_priority(&self) -> Result<&P, HeapError> {
        Ok(&self.root()?.priority)
    }

    pub fn contains(&self, value: &V) -> bool {
        self.index.contains_key(value)
    }

    pub fn priority(&self, value: &V) -> Option<&P> {
        let position = self.position(value)?;
        self.entries.get(position).ok().map(|entry| &entry.priority)
    }

    /// The array slot the index records for `value`.
    pub fn position(&self, value: &V) -> Option<usize> {
        self.index.get(value).copied()
    }

    /// Values and priorities in array order, root first.
    pub fn iter(&self) -> impl Iterator<Item = (&V, &P)> + '_ {
        self.entries
            .iter()
            .map(|entry| (&entry.value, &entry.priority))
    }

    /// Adds `value` with `priority`.
    ///
    /// Fails with [`HeapError::DuplicateValue`] if `value` is already held,
    /// leaving the heap untouched.
    pub fn add(&mut self, value: V, priority: P) -> Result<(), HeapError> {
        if self.index.contains_key(&value) {
            return Err(HeapError::DuplicateValue);
        }
        let position = self.entries.len();
        self.entries.append(Entry::new(value.clone(), priority))?;
        self.index.put(value, position);
        self.bubble_up(position)
    }

    /// Gives `value` a new priority and returns the one it replaced.
    ///
    /// Fails with [`HeapError::NotFound`] if `value` is not held.
    pub fn change_priority(&mut self, value: &V, priority: P) -> Result<P, HeapError> {
        let position = self.position(value).ok_or(HeapError::NotFound)?;
        let replacement = Entry::new(self.entries.get(position)?.value.clone(), priority);
        let replaced = self
            .entries
            .put(position, replacement)?
            .ok_or(AListError::VacantSlot { index: position })?;
        // Only one of these can move the entry.
        self.bubble_up(position)?;
        self.bubble_down(position)?;
        Ok(replaced.priority)
    }

    /// Removes and returns the value with the lowest priority.
    pub fn poll(&mut self) -> Result<V, HeapError> {
        Ok(self.poll_entry()?.value)
    }

    pub fn poll_with_priority(&mut self) -> Result<(V, P), HeapError> {
        Ok(self.poll_entry()?.into_pair())
    }

    /// Drains the heap into `(value, priority)` pairs, lowest priority first.
    pub fn into_sorted_vec(mut self) -> Result<Vec<(V, P)>, HeapError> {
        let mut sorted = Vec::with_capacity(self.len());
        while !self.is_empty() {
            sorted.push(self.poll_with_priority()?);
        }
        Ok(sorted)
    }

    fn root(&self) -> Result<&Entry<V, P>, HeapError> {
        if self.is_empty() {
            return Err(HeapError::EmptyCollection);
        }
        Ok(self.entries.get(0)?)
    }

    fn poll_entry(&mut self) -> Result<Entry<V, P>, HeapError> {
        if self.is_empty() {
            return Err(HeapError::EmptyCollection);
        }
        let last = self.entries.pop()?;
        if self.entries.is_empty() {
            self.index.remove(&last.value);
            return Ok(last);
        }
        let root = self
            .entries
            .put(0, last)?
            .ok_or(AListError::VacantSlot { index: 0 })?;
        self.index.remove(&root.value);
        self.record_position(0)?;
        self.bubble_down(0)?;
        trace!("polled root, {} entries remain", self.entries.len());
        Ok(root)
    }

    /// Exchanges slots `h` and `k` and points both values' index entries at
    /// their new slots.
    fn swap(&mut self, h: usize, k: usize) -> Result<(), HeapError> {
        self.entries.swap(h, k)?;
        self.record_position(h)?;
        self.record_position(k)
    }

    /// Points the index entry of the value in `position` at that slot. The
    /// value must already be indexed.
    fn record_position(&mut self, position: usize) -> Result<(), HeapError> {
        let value = &self.entries.get(position)?.value;
        let slot = self
            .index
            .get_mut(value)
            .ok_or(HeapError::Unindexed { position })?;
        *slot = position;
        Ok(())
    }

    fn compare(&self, a: usize, b: usize) -> Result<Ordering, HeapError> {
        let a = &self.entries.get(a)?.priority;
        let b = &self.entries.get(b)?.priority;
        Ok(a.cmp(b))
    }

    fn bubble_up(&mut self, mut k: usize) -> Result<(), HeapError> {
        while k > 0 {
            let parent = (k - 1) / 2;
            if self.compare(k, parent)? != Ordering::Less {
                break;
            }
            trace!("bubbling slot {k} up to {parent}");
            self.swap(k, parent)?;
            k = parent;
        }
        Ok(())
    }

    fn bubble_down(&mut self, mut k: usize) -> Result<(), HeapError> {
        while let Some(child) = self.smaller_child(k)? {
            if self.compare(k, child)? != Ordering::Greater {
                break;
            }
            trace!("bubbling slot {k} down to {child}");
            self.swap(k, child)?;
            k = child;
        }
        Ok(())
    }

    /// The child of `k` with the smaller priority, the right one on a tie.
    /// `None` when `k` is a leaf.
    fn smaller_child(&self, k: usize) -> Result<Option<usize>, HeapError> {
        let left = 2 * k + 1;
        if left >= self.entries.len() {
            return Ok(None);
        }
        let right = left + 1;
        if right >= self.entries.len() || self.compare(left, right)? == Ordering::Less {
            return Ok(Some(left));
        }
        Ok(Some(right))
    }
}

impl<V: Debug, P: Debug, S> Debug for IndexedHeap<V, P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedHeap")
            .field("entries", &self.entries)
            .field("index", &self.index)
            .finish()
    }
}
