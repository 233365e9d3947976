//! Windowed chunk merger.

use log;

use crate::chunk::Chunk;
use crate::sort::{SortError, SortingEngine};

impl SortingEngine {
    /// Merges two adjacent sorted chunks `first_start..=first_end` and `second_start..=second_end`.
    ///
    /// No merge buffer is used: every value of the second chunk is inserted into the already merged
    /// prefix by bubbling it leftwards through overlapping memory-sized windows.
    pub fn merge_chunks(
        &mut self,
        first_start: usize,
        first_end: usize,
        second_start: usize,
        second_end: usize,
    ) -> Result<(), SortError> {
        let first = self.check_range(first_start, first_end)?;
        let second = self.check_range(second_start, second_end)?;
        if !first.precedes(&second) {
            return Err(SortError::NonAdjacentChunks {
                first_end,
                second_start,
            });
        }

        self.merge(first, second);
        Ok(())
    }

    /// Inserts the values of `second` one by one into the sorted range that starts at `first`.
    ///
    /// For the value at disk index `index` the first window is the one ending at `index`. Only the
    /// part of a window up to `index` is sorted, so its last cell is the relocated value which is kept
    /// in the sentinel cell. The window moves one cell to the left as long as the relocated value
    /// ends up in the first cell, and never moves past the start of `first`.
    pub(crate) fn merge(&mut self, first: Chunk, second: Chunk) {
        log::debug!("merging chunks {} and {}", first, second);
        self.stats.merges += 1;

        let buffer_size = self.memory.buffer_size();
        for index in second.start()..=second.end() {
            let mut window = (index + 1).saturating_sub(buffer_size).max(first.start());
            loop {
                self.load_window(window);
                self.stats.merge_windows += 1;

                let visible = (index - window + 1).min(buffer_size);
                if self.sentinel.is_unset(self.memory.sentinel()) {
                    let last = self.memory.cells()[visible - 1];
                    self.memory.set_sentinel(Some(last));
                }
                let relocated = self.memory.sentinel();

                self.bubble_sort(visible);
                self.store_window(window);
                log::trace!("window at {} sorted (relocated value: {:?})", window, relocated);

                if Some(self.memory.cells()[0]) != relocated || window == first.start() {
                    break;
                }
                window -= 1;
            }
            self.clear();
        }
    }
}
