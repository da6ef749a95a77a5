pub mod alist;
pub mod builder;
pub(crate) mod entry;
pub mod hash_table;
pub mod indexed_heap;

use thiserror::Error;

use self::alist::AListError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeapError {
    #[error("the heap is empty")]
    EmptyCollection,
    #[error("value is already in the heap")]
    DuplicateValue,
    #[error("value is not in the heap")]
    NotFound,
    /// The value in `position` has no entry in the value index.
    #[error("value in slot {position} is missing from the index")]
    Unindexed { position: usize },
    /// The array and the value index disagree about where an entry lives.
    #[error("heap storage is inconsistent: {0}")]
    Storage(#[from] AListError),
}

#[cfg(test)]
mod tests {
    use super::{alist::AListError, HeapError};

    #[test]
    fn test_error_messages() {
        assert_eq!(HeapError::EmptyCollection.to_string(), "the heap is empty");
        assert_eq!(HeapError::NotFound.to_string(), "value is not in the heap");
        let storage: HeapError = AListError::OutOfBounds { index: 4, len: 2 }.into();
        assert_eq!(
            storage.to_string(),
            "heap storage is inconsistent: index 4 is out of bounds for length 2"
        );
    }
}
