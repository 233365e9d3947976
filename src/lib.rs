//! `ext-sort-sim` is a simulation of a disk-constrained external merge sort.
//!
//! External sorting handles datasets that don't fit into the main memory and reside on slower storage.
//! This crate models it on an in-process array: the dataset plays the role of the disk, while every
//! comparison happens inside a small fixed-size [`Memory`] values have to be explicitly loaded into
//! and stored back from. For more information see [External Sorting](https://en.wikipedia.org/wiki/External_sorting).
//!
//! # Overview
//!
//! * **Bounded working set:**
//!   memory holds `memory_size - 2` dataset values at a time, the remaining two cells are reserved
//!   for a swap scratch value and a merge sentinel.
//! * **Divide, sort and merge:**
//!   chunks fitting into memory are bubble-sorted directly, larger ones are split in halves,
//!   sorted recursively and merged through sliding memory-sized windows.
//! * **Transfer accounting:**
//!   loads, stores, swaps and comparisons are counted in [`TransferStats`].
//!
//! # Example
//!
//! ```
//! use ext_sort_sim::SortingEngine;
//!
//! let mut engine = SortingEngine::new(4).unwrap();
//! engine.read_array(&[5, 3, 4, 1, 2]);
//!
//! assert_eq!(engine.sort(), &[1, 2, 3, 4, 5]);
//! ```

pub mod check;
pub mod chunk;
pub mod memory;
pub mod merger;
pub mod sort;

pub use check::{verify, Mismatch};
pub use chunk::Chunk;
pub use memory::{Memory, MIN_MEMORY_SIZE, RESERVED_CELLS};
pub use sort::{Sentinel, SortError, SortingEngine, SortingEngineBuilder, TransferStats};
