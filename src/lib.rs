pub mod config;
pub mod heap;

pub use config::{ConfigError, HeapConfig};
pub use heap::{builder::HeapBuilder, indexed_heap::IndexedHeap, HeapError};

#[macro_use]
extern crate log;
