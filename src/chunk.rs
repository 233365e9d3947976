use std::fmt;

/// Contiguous range of disk indices sorted as a unit. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    start: usize,
    end: usize,
}

impl Chunk {
    /// Creates a chunk covering `start..=end`. Returns [`None`] if `end` precedes `start`.
    pub fn new(start: usize, end: usize) -> Option<Self> {
        (start <= end).then(|| Chunk { start, end })
    }

    /// Creates a chunk covering a whole dataset of `len` values, [`None`] for an empty one.
    pub fn whole(len: usize) -> Option<Self> {
        Chunk::new(0, len.checked_sub(1)?)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Checks if the chunk can be loaded into a buffer of `buffer_size` cells in one go.
    pub fn fits(&self, buffer_size: usize) -> bool {
        self.len() <= buffer_size
    }

    /// Splits the chunk at `start + len / 2`. The split point belongs to the first half,
    /// so the first half is the larger one.
    /// Returns [`None`] for chunks shorter than 3 values which can't be split that way.
    pub fn split(&self) -> Option<(Chunk, Chunk)> {
        if self.len() < 3 {
            return None;
        }

        let mid = self.start + self.len() / 2;
        return Some((
            Chunk {
                start: self.start,
                end: mid,
            },
            Chunk {
                start: mid + 1,
                end: self.end,
            },
        ));
    }

    /// Checks if `next` starts right after this chunk ends.
    pub fn precedes(&self, next: &Chunk) -> bool {
        self.end + 1 == next.start
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::Chunk;

    #[rstest]
    #[case(0, 4, Some(((0, 2), (3, 4))))]
    #[case(0, 2, Some(((0, 1), (2, 2))))]
    #[case(3, 8, Some(((3, 6), (7, 8))))]
    #[case(5, 6, None)]
    #[case(5, 5, None)]
    fn test_chunk_split(
        #[case] start: usize,
        #[case] end: usize,
        #[case] expected: Option<((usize, usize), (usize, usize))>,
    ) {
        let chunk = Chunk::new(start, end).unwrap();
        let actual = chunk
            .split()
            .map(|(first, second)| ((first.start(), first.end()), (second.start(), second.end())));
        assert_eq!(actual, expected);

        if let Some((first, second)) = chunk.split() {
            assert!(first.precedes(&second));
            assert_eq!(first.len() + second.len(), chunk.len());
        }
    }

    #[test]
    fn test_chunk_bounds() {
        assert_eq!(Chunk::new(3, 2), None);
        assert_eq!(Chunk::whole(0), None);

        let chunk = Chunk::whole(5).unwrap();
        assert_eq!(chunk.len(), 5);
        assert_eq!(chunk.to_string(), "[0, 4]");
        assert!(chunk.fits(5));
        assert!(!chunk.fits(4));
    }
}
