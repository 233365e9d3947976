//! Fixed-capacity working memory.

use std::ops::Range;

use crate::sort::SortError;

/// Number of memory cells excluded from the usable region.
/// One is the swap scratch cell, the other one holds the merge sentinel.
pub const RESERVED_CELLS: usize = 2;

/// Smallest accepted memory size. Leaves at least two usable cells so that a chunk
/// larger than the buffer can always be split into two smaller ones.
pub const MIN_MEMORY_SIZE: usize = RESERVED_CELLS + 2;

/// Working memory every disk value has to pass through to be compared or reordered.
///
/// The memory consists of a usable region of `memory_size - 2` cells and two control slots:
/// a scratch cell used by [`Memory::swap`] and a sentinel cell remembering the value relocated
/// by a merge. The memory is never resized after creation.
#[derive(Debug, Clone)]
pub struct Memory {
    usable: Box<[i32]>,
    scratch: i32,
    sentinel: Option<i32>,
    /// Disk range copied into the usable region by the last load.
    resident: Option<Range<usize>>,
}

impl Memory {
    /// Creates a zeroed memory of `memory_size` cells.
    ///
    /// # Arguments
    /// * `memory_size` - Total number of cells including the reserved ones. Must be at least
    ///   [`MIN_MEMORY_SIZE`].
    pub fn new(memory_size: usize) -> Result<Self, SortError> {
        if memory_size < MIN_MEMORY_SIZE {
            return Err(SortError::MemoryTooSmall { memory_size });
        }

        return Ok(Memory {
            usable: vec![0; memory_size - RESERVED_CELLS].into_boxed_slice(),
            scratch: 0,
            sentinel: None,
            resident: None,
        });
    }

    /// Returns the total number of cells including the reserved ones.
    pub fn size(&self) -> usize {
        self.usable.len() + RESERVED_CELLS
    }

    /// Returns the number of usable cells, i.e. how many disk values fit at once.
    pub fn buffer_size(&self) -> usize {
        self.usable.len()
    }

    /// Returns the usable region.
    pub fn cells(&self) -> &[i32] {
        &self.usable
    }

    /// Returns the swap scratch cell.
    pub fn scratch(&self) -> i32 {
        self.scratch
    }

    /// Returns the value held by the sentinel cell, [`None`] if nothing was captured since the last clear.
    pub fn sentinel(&self) -> Option<i32> {
        self.sentinel
    }

    /// Returns the disk range copied in by the last load, [`None`] after a clear.
    pub fn resident(&self) -> Option<Range<usize>> {
        self.resident.clone()
    }

    pub(crate) fn set_sentinel(&mut self, value: Option<i32>) {
        self.sentinel = value;
    }

    /// Number of values moved by a transfer starting at disk index `start`.
    pub(crate) fn transfer_len(&self, disk_len: usize, start: usize) -> usize {
        disk_len.saturating_sub(start).min(self.buffer_size())
    }

    /// Copies a disk window starting at `start` into the usable region.
    /// Cells past the copied count keep their previous values.
    pub(crate) fn load_from(&mut self, disk: &[i32], start: usize) -> usize {
        let count = self.transfer_len(disk.len(), start);
        self.usable[..count].copy_from_slice(&disk[start..start + count]);
        self.resident = Some(start..start + count);
        count
    }

    /// Copies the usable region back to the disk starting at `start`.
    pub(crate) fn store_to(&self, disk: &mut [i32], start: usize) -> usize {
        let count = self.transfer_len(disk.len(), start);
        disk[start..start + count].copy_from_slice(&self.usable[..count]);
        count
    }

    /// Zeroes every cell, usable and reserved.
    pub(crate) fn clear(&mut self) {
        self.usable.fill(0);
        self.scratch = 0;
        self.sentinel = None;
        self.resident = None;
    }

    /// Exchanges two usable cells through the scratch cell. Indices must be below `buffer_size()`.
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.scratch = self.usable[a];
        self.usable[a] = self.usable[b];
        self.usable[b] = self.scratch;
    }
}
