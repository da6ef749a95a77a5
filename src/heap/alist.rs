use thiserror::Error;

/// Capacity used by [`AList::new`].
pub const DEFAULT_CAPACITY: usize = 8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AListError {
    #[error("index {index} is out of bounds for length {len}")]
    OutOfBounds { index: usize, len: usize },
    #[error("the list is empty")]
    EmptyCollection,
    #[error("slot {index} was never written")]
    VacantSlot { index: usize },
    #[error("cannot grow capacity to hold {requested} slots")]
    CapacityOverflow { requested: usize },
}

/// A growable array that doubles its backing storage when an append or
/// resize would overflow it. Capacity never shrinks.
///
/// `slots.len()` is the capacity; only `[0, len)` is addressable.
#[derive(Debug, Clone)]
pub struct AList<T> {
    slots: Vec<Option<T>>,
    len: usize,
}

impl<T> Default for AList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AList<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vacant_slots(capacity.max(1)),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, index: usize) -> Result<&T, AListError> {
        self.check_bounds(index)?;
        self.slots[index]
            .as_ref()
            .ok_or(AListError::VacantSlot { index })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, AListError> {
        self.check_bounds(index)?;
        self.slots[index]
            .as_mut()
            .ok_or(AListError::VacantSlot { index })
    }

    /// Overwrites slot `index`, returning whatever it held before.
    pub fn put(&mut self, index: usize, value: T) -> Result<Option<T>, AListError> {
        self.check_bounds(index)?;
        Ok(self.slots[index].replace(value))
    }

    pub fn append(&mut self, value: T) -> Result<(), AListError> {
        let index = self.len;
        self.resize(index + 1)?;
        self.slots[index] = Some(value);
        Ok(())
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Result<T, AListError> {
        if self.len == 0 {
            return Err(AListError::EmptyCollection);
        }
        let index = self.len - 1;
        let value = self.slots[index]
            .take()
            .ok_or(AListError::VacantSlot { index })?;
        self.len = index;
        Ok(value)
    }

    /// Sets the logical length to `new_len`. Slots exposed by growing are
    /// vacant until written with `put`; elements past a shrunk length are dropped.
    pub fn resize(&mut self, new_len: usize) -> Result<(), AListError> {
        self.grow_if_needed(new_len)?;
        for slot in self.slots.iter_mut().take(self.len).skip(new_len) {
            *slot = None;
        }
        self.len = new_len;
        Ok(())
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), AListError> {
        self.check_bounds(a)?;
        self.check_bounds(b)?;
        self.slots.swap(a, b);
        Ok(())
    }

    /// Written elements of `[0, len)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots[..self.len].iter().flatten()
    }

    fn check_bounds(&self, index: usize) -> Result<(), AListError> {
        if index >= self.len {
            return Err(AListError::OutOfBounds {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    fn grow_if_needed(&mut self, new_len: usize) -> Result<(), AListError> {
        let old_capacity = self.slots.len();
        let mut capacity = old_capacity;
        while new_len > capacity {
            capacity = capacity
                .checked_mul(2)
                .ok_or(AListError::CapacityOverflow { requested: new_len })?;
        }
        if capacity != old_capacity {
            trace!("growing list from {old_capacity} to {capacity} slots");
            self.slots.resize_with(capacity, || None);
        }
        Ok(())
    }
}

fn vacant_slots<T>(capacity: usize) -> Vec<Option<T>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || None);
    slots
}

#[cfg(test)]
mod tests {
    use super::{AList, AListError, DEFAULT_CAPACITY};

    #[test]
    fn test_append_and_get() {
        let mut list = AList::new();
        assert_eq!(list.capacity(), DEFAULT_CAPACITY);
        for i in 0..5 {
            list.append(i * 10).unwrap();
        }
        assert_eq!(list.len(), 5);
        assert_eq!(list.get(3), Ok(&30));
        assert_eq!(
            list.get(5),
            Err(AListError::OutOfBounds { index: 5, len: 5 })
        );
    }

    #[test]
    fn test_append_doubles_capacity() {
        let mut list = AList::with_capacity(2);
        list.append('a').unwrap();
        list.append('b').unwrap();
        assert_eq!(list.capacity(), 2);
        list.append('c').unwrap();
        assert_eq!(list.capacity(), 4);
        list.append('d').unwrap();
        list.append('e').unwrap();
        assert_eq!(list.capacity(), 8);
        assert_eq!(list.iter().collect::<String>(), "abcde");
    }

    #[test]
    fn test_put_replaces() {
        let mut list = AList::new();
        list.append("first").unwrap();
        assert_eq!(list.put(0, "second"), Ok(Some("first")));
        assert_eq!(list.get(0), Ok(&"second"));
        *list.get_mut(0).unwrap() = "edited";
        assert_eq!(list.get(0), Ok(&"edited"));
        assert_eq!(
            list.put(1, "third"),
            Err(AListError::OutOfBounds { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_put_on_empty_list_fails() {
        let mut list = AList::new();
        assert_eq!(
            list.put(0, 1),
            Err(AListError::OutOfBounds { index: 0, len: 0 })
        );
        assert!(list.is_empty());
    }

    #[test]
    fn test_pop_keeps_capacity() {
        let mut list = AList::with_capacity(1);
        for i in 0..9 {
            list.append(i).unwrap();
        }
        assert_eq!(list.capacity(), 16);
        for i in (0..9).rev() {
            assert_eq!(list.pop(), Ok(i));
        }
        assert_eq!(list.pop(), Err(AListError::EmptyCollection));
        assert_eq!(list.capacity(), 16);
    }

    #[test]
    fn test_resize_grows_repeatedly() {
        let mut list: AList<u8> = AList::with_capacity(3);
        list.resize(20).unwrap();
        assert_eq!(list.len(), 20);
        assert_eq!(list.capacity(), 24);
        assert_eq!(list.get(19), Err(AListError::VacantSlot { index: 19 }));
        list.put(19, 7).unwrap();
        assert_eq!(list.get(19), Ok(&7));
    }

    #[test]
    fn test_resize_shrinks_length_only() {
        let mut list = AList::new();
        for i in 0..6 {
            list.append(i).unwrap();
        }
        list.resize(2).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.capacity(), DEFAULT_CAPACITY);
        list.resize(4).unwrap();
        assert_eq!(list.get(3), Err(AListError::VacantSlot { index: 3 }));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_resize_past_addressable_capacity_fails() {
        let mut list: AList<u8> = AList::new();
        list.append(1).unwrap();
        assert_eq!(
            list.resize(usize::MAX / 2 + 2),
            Err(AListError::CapacityOverflow {
                requested: usize::MAX / 2 + 2
            })
        );
        assert_eq!(list.len(), 1);
        assert_eq!(list.capacity(), DEFAULT_CAPACITY);
        assert_eq!(list.get(0), Ok(&1));
    }

    #[test]
    fn test_swap() {
        let mut list = AList::new();
        list.append(1).unwrap();
        list.append(2).unwrap();
        list.swap(0, 1).unwrap();
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![2, 1]);
        assert!(list.swap(0, 2).is_err());
    }
}
