//! Result validation against the standard library sort.

use std::error::Error;
use std::fmt;

/// Difference between a sort output and the reference sort of its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// Output length differs from the input one.
    Length { expected: usize, actual: usize },
    /// First position where the output differs from the reference.
    Value { index: usize, expected: i32, actual: i32 },
}

impl Error for Mismatch {}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            Mismatch::Length { expected, actual } => {
                write!(f, "length mismatch: expected {}, actual {}", expected, actual)
            }
            Mismatch::Value { index, expected, actual } => {
                write!(f, "{}: expected[i] = {} output[i] = {}", index, expected, actual)
            }
        }
    }
}

/// Checks that `output` is `input` sorted in ascending order.
/// Reports the first differing position if it isn't.
pub fn verify(input: &[i32], output: &[i32]) -> Result<(), Mismatch> {
    if input.len() != output.len() {
        return Err(Mismatch::Length {
            expected: input.len(),
            actual: output.len(),
        });
    }

    let mut expected = input.to_vec();
    expected.sort_unstable();

    match expected.iter().zip(output).position(|(expected, actual)| expected != actual) {
        Some(index) => Err(Mismatch::Value {
            index,
            expected: expected[index],
            actual: output[index],
        }),
        None => Ok(()),
    }
}
