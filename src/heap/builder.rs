use std::hash::Hash;

use super::{hash_table, indexed_heap::{IndexedHeap, DEFAULT_ARRAY_CAPACITY}};

/// Collects initial capacities for an [`IndexedHeap`].
///
/// Sizing both up front avoids the one-off stalls of array doubling and
/// index rehashing while the heap fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapBuilder {
    array_capacity: usize,
    index_capacity: usize,
}

impl Default for HeapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeapBuilder {
    pub fn new() -> Self {
        Self {
            array_capacity: DEFAULT_ARRAY_CAPACITY,
            index_capacity: hash_table::DEFAULT_CAPACITY,
        }
    }

    pub fn with_array_capacity(self, array_capacity: usize) -> Self {
        Self {
            array_capacity,
            ..self
        }
    }

    pub fn with_index_capacity(self, index_capacity: usize) -> Self {
        Self {
            index_capacity,
            ..self
        }
    }

    /// Sizes both the array and the index for `expected` values.
    pub fn with_expected_len(self, expected: usize) -> Self {
        // keep the index under its 0.8 load factor
        let index_capacity = expected + expected / 4 + 1;
        Self {
            array_capacity: expected.max(1),
            index_capacity,
        }
    }

    pub fn build<V, P>(self) -> IndexedHeap<V, P>
    where
        V: Hash + Eq + Clone,
        P: Ord,
    {
        debug!(
            "building heap with {} array slots and {} index buckets",
            self.array_capacity, self.index_capacity
        );
        IndexedHeap::with_capacity(self.array_capacity, self.index_capacity)
    }
}
