//! Sorting engine.

use log;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::time::{Duration, Instant};

use crate::chunk::Chunk;
use crate::memory::{Memory, MIN_MEMORY_SIZE};

/// Sorting error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// Memory can't hold the reserved cells plus a usable region of at least two cells.
    MemoryTooSmall { memory_size: usize },
    /// Disk range lies outside the dataset or ends before it starts.
    OutOfRange { start: usize, end: usize, len: usize },
    /// Memory cell index lies outside the usable region.
    CellOutOfRange { index: usize, buffer_size: usize },
    /// Merged chunks are not adjacent.
    NonAdjacentChunks { first_end: usize, second_start: usize },
}

impl Error for SortError {}

impl Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            SortError::MemoryTooSmall { memory_size } => write!(
                f,
                "memory size {} is too small, at least {} cells required",
                memory_size, MIN_MEMORY_SIZE
            ),
            SortError::OutOfRange { start, end, len } => {
                write!(f, "disk range [{}, {}] is out of range (length: {})", start, end, len)
            }
            SortError::CellOutOfRange { index, buffer_size } => {
                write!(f, "memory cell {} is out of range (buffer size: {})", index, buffer_size)
            }
            SortError::NonAdjacentChunks { first_end, second_start } => write!(
                f,
                "chunks are not adjacent (first ends at {}, second starts at {})",
                first_end, second_start
            ),
        }
    }
}

/// Interpretation of the sentinel cell during a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    /// The cell is unset until a value is captured, whatever that value is.
    Explicit,
    /// A captured `0` reads as unset and gets replaced on the next window.
    /// Datasets containing zeros may come out unsorted in this mode.
    ZeroUnset,
}

impl Sentinel {
    /// Checks if a sentinel cell holding `value` has to be (re)captured.
    pub fn is_unset(&self, value: Option<i32>) -> bool {
        match (self, value) {
            (_, None) => true,
            (Sentinel::Explicit, Some(_)) => false,
            (Sentinel::ZeroUnset, Some(value)) => value == 0,
        }
    }
}

impl Default for Sentinel {
    fn default() -> Self {
        Sentinel::Explicit
    }
}

/// Disk/memory transfer counters collected during a sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferStats {
    /// Disk to memory transfers.
    pub loads: usize,
    /// Memory to disk transfers.
    pub stores: usize,
    /// Memory clears.
    pub clears: usize,
    /// In-memory swaps.
    pub swaps: usize,
    /// In-memory comparisons.
    pub comparisons: usize,
    /// Chunks sorted directly in memory.
    pub direct_sorts: usize,
    /// Merged chunk pairs.
    pub merges: usize,
    /// Windows processed by merges.
    pub merge_windows: usize,
}

/// Sorting engine builder. Provides methods for [`SortingEngine`] initialization.
#[derive(Debug, Clone)]
pub struct SortingEngineBuilder {
    /// Total memory size in cells, reserved ones included.
    memory_size: usize,
    /// Sentinel cell interpretation.
    sentinel: Sentinel,
}

impl SortingEngineBuilder {
    /// Creates an instance of a builder with default parameters.
    pub fn new() -> Self {
        SortingEngineBuilder::default()
    }

    /// Builds a [`SortingEngine`] instance using provided configuration.
    pub fn build(self) -> Result<SortingEngine, SortError> {
        SortingEngine::with_sentinel(self.memory_size, self.sentinel)
    }

    /// Sets memory size in cells, the two reserved cells included.
    pub fn with_memory_size(mut self, memory_size: usize) -> SortingEngineBuilder {
        self.memory_size = memory_size;
        return self;
    }

    /// Sets sentinel cell interpretation.
    pub fn with_sentinel(mut self, sentinel: Sentinel) -> SortingEngineBuilder {
        self.sentinel = sentinel;
        return self;
    }
}

impl Default for SortingEngineBuilder {
    fn default() -> Self {
        SortingEngineBuilder {
            memory_size: MIN_MEMORY_SIZE,
            sentinel: Sentinel::default(),
        }
    }
}

/// Sorting engine.
///
/// Owns a dataset simulating a disk and a small [`Memory`] every value has to be loaded into
/// before it can be compared. Chunks that fit into the memory are bubble-sorted directly,
/// larger ones are split in halves, sorted recursively and merged through memory-sized windows.
#[derive(Debug, Clone)]
pub struct SortingEngine {
    /// Dataset being sorted.
    pub(crate) disk: Vec<i32>,
    /// Working memory.
    pub(crate) memory: Memory,
    /// Sentinel cell interpretation used by merges.
    pub(crate) sentinel: Sentinel,
    /// Counters of the current dataset.
    pub(crate) stats: TransferStats,
    /// Duration of the last sort.
    elapsed: Option<Duration>,
}

impl SortingEngine {
    /// Creates a new sorting engine with an explicit sentinel.
    ///
    /// # Arguments
    /// * `memory_size` - Total memory size in cells. Two of them are reserved, so at least
    ///   [`MIN_MEMORY_SIZE`] cells are required.
    pub fn new(memory_size: usize) -> Result<Self, SortError> {
        Self::with_sentinel(memory_size, Sentinel::default())
    }

    /// Creates a new sorting engine.
    ///
    /// # Arguments
    /// * `memory_size` - Total memory size in cells.
    /// * `sentinel` - Sentinel cell interpretation used by merges.
    pub fn with_sentinel(memory_size: usize, sentinel: Sentinel) -> Result<Self, SortError> {
        let memory = Memory::new(memory_size)?;
        log::info!(
            "initializing sorting engine (memory size: {}, buffer size: {}, sentinel: {:?})",
            memory.size(),
            memory.buffer_size(),
            sentinel
        );

        return Ok(SortingEngine {
            disk: Vec::new(),
            memory,
            sentinel,
            stats: TransferStats::default(),
            elapsed: None,
        });
    }

    /// Copies `data` to the disk replacing the previous dataset.
    /// Resets the memory and the counters.
    pub fn read_array(&mut self, data: &[i32]) {
        self.disk = data.to_vec();
        self.memory.clear();
        self.stats = TransferStats::default();
        self.elapsed = None;
        log::debug!("read {} values to the disk", self.disk.len());
    }

    /// Returns the dataset.
    pub fn disk(&self) -> &[i32] {
        &self.disk
    }

    /// Returns the working memory.
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Returns the transfer counters collected since the dataset was read.
    pub fn stats(&self) -> TransferStats {
        self.stats
    }

    /// Returns the duration of the last sort.
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Returns the sentinel cell interpretation.
    pub fn sentinel(&self) -> Sentinel {
        self.sentinel
    }

    /// Consumes the engine returning the dataset.
    pub fn into_disk(self) -> Vec<i32> {
        self.disk
    }

    /// Copies up to `buffer_size` values starting at disk index `start` into memory.
    /// Returns the number of copied values.
    pub fn load(&mut self, start: usize) -> Result<usize, SortError> {
        self.check_index(start)?;
        Ok(self.load_window(start))
    }

    /// Copies up to `buffer_size` memory values back to the disk starting at `start`.
    /// Returns the number of copied values.
    pub fn store(&mut self, start: usize) -> Result<usize, SortError> {
        self.check_index(start)?;
        Ok(self.store_window(start))
    }

    /// Zeroes the whole memory, reserved cells included.
    pub fn clear(&mut self) {
        self.memory.clear();
        self.stats.clears += 1;
    }

    /// Exchanges two usable memory cells through the scratch cell.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), SortError> {
        let buffer_size = self.memory.buffer_size();
        if let Some(&index) = [a, b].iter().find(|&&index| index >= buffer_size) {
            return Err(SortError::CellOutOfRange { index, buffer_size });
        }

        self.memory.swap(a, b);
        self.stats.swaps += 1;
        Ok(())
    }

    /// Bubble-sorts the first `min(range, buffer_size)` memory cells in ascending order.
    pub fn bubble_sort(&mut self, range: usize) {
        let limit = range.min(self.memory.buffer_size()).saturating_sub(1);
        for pass in 0..limit {
            for j in 0..limit - pass {
                self.stats.comparisons += 1;
                if self.memory.cells()[j] > self.memory.cells()[j + 1] {
                    self.memory.swap(j, j + 1);
                    self.stats.swaps += 1;
                }
            }
        }
    }

    /// Sorts the disk range `start..=end` in place.
    pub fn sort_and_merge(&mut self, start: usize, end: usize) -> Result<(), SortError> {
        let chunk = self.check_range(start, end)?;
        self.sort_chunk(chunk);
        Ok(())
    }

    /// Sorts the whole dataset and returns it.
    pub fn sort(&mut self) -> &[i32] {
        let started = Instant::now();
        if let Some(chunk) = Chunk::whole(self.disk.len()) {
            self.sort_chunk(chunk);
        }
        let elapsed = started.elapsed();
        self.elapsed = Some(elapsed);

        log::info!(
            "finished: {:?} (input size: {}, memory size: {})",
            elapsed,
            self.disk.len(),
            self.memory.size()
        );
        log::info!("transfers: {:?}", self.stats);

        &self.disk
    }

    fn sort_chunk(&mut self, chunk: Chunk) {
        if !chunk.fits(self.memory.buffer_size()) {
            // memory holds at least two values so the chunk has at least three
            if let Some((first, second)) = chunk.split() {
                self.sort_chunk(first);
                self.sort_chunk(second);
                self.merge(first, second);
            }
        } else if chunk.len() > 1 {
            log::debug!("sorting chunk {} in memory", chunk);
            self.load_window(chunk.start());
            self.bubble_sort(chunk.len());
            self.store_window(chunk.start());
            self.clear();
            self.stats.direct_sorts += 1;
        }
    }

    pub(crate) fn load_window(&mut self, start: usize) -> usize {
        self.stats.loads += 1;
        self.memory.load_from(&self.disk, start)
    }

    pub(crate) fn store_window(&mut self, start: usize) -> usize {
        self.stats.stores += 1;
        self.memory.store_to(&mut self.disk, start)
    }

    fn check_index(&self, index: usize) -> Result<(), SortError> {
        self.check_range(index, index).map(|_| ())
    }

    pub(crate) fn check_range(&self, start: usize, end: usize) -> Result<Chunk, SortError> {
        let len = self.disk.len();
        match Chunk::new(start, end) {
            Some(chunk) if end < len => Ok(chunk),
            _ => Err(SortError::OutOfRange { start, end, len }),
        }
    }
}
