use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::*;

use ext_sort_sim::{verify, Sentinel, SortError, SortingEngine, SortingEngineBuilder};

#[fixture]
fn rng() -> StdRng {
    StdRng::seed_from_u64(20260101)
}

#[rstest]
fn test_differential_against_reference(rng: StdRng) {
    let mut rng = rng;
    for memory_size in 4..20 {
        for len in [0, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144] {
            let input: Vec<i32> = (0..len).map(|_| rng.gen_range(-1000..1000)).collect();

            let mut engine = SortingEngine::new(memory_size).unwrap();
            engine.read_array(&input);
            let output = engine.sort().to_vec();

            assert_eq!(verify(&input, &output), Ok(()), "memory_size={}, len={}", memory_size, len);
        }
    }
}

#[rstest]
fn test_large_value_range(rng: StdRng) {
    let mut rng = rng;
    let input: Vec<i32> = (0..200).map(|_| rng.gen_range(0..i32::MAX)).collect();

    let mut engine = SortingEngineBuilder::new().with_memory_size(10).build().unwrap();
    engine.read_array(&input);
    let output = engine.sort().to_vec();

    assert!(output.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(verify(&input, &output), Ok(()));
    assert!(engine.stats().merges > 0);
}

#[rstest]
fn test_zero_sentinel_keeps_values(rng: StdRng) {
    let mut rng = rng;
    for _ in 0..100 {
        let len = rng.gen_range(0..40);
        let input: Vec<i32> = (0..len).map(|_| rng.gen_range(-3..3)).collect();

        let mut engine = SortingEngine::with_sentinel(rng.gen_range(4..9), Sentinel::ZeroUnset).unwrap();
        engine.read_array(&input);

        let mut output = engine.sort().to_vec();
        let mut expected = input.clone();
        output.sort();
        expected.sort();
        assert_eq!(output, expected);
    }
}

#[test]
fn test_zero_sentinel_without_zeros_sorts() {
    let input = vec![7, -2, 9, 4, 4, -8, 1, 3, 6, -5, 2, 10];

    let mut engine = SortingEngine::with_sentinel(5, Sentinel::ZeroUnset).unwrap();
    engine.read_array(&input);
    let output = engine.sort().to_vec();

    assert_eq!(verify(&input, &output), Ok(()));
}

#[test]
fn test_zero_sentinel_quirk() {
    let input = vec![1, 1, 1, 1, -1, 0];

    let mut legacy = SortingEngine::with_sentinel(5, Sentinel::ZeroUnset).unwrap();
    legacy.read_array(&input);
    assert_eq!(legacy.sort(), &[-1, 1, 0, 1, 1, 1]);

    let mut engine = SortingEngine::new(5).unwrap();
    engine.read_array(&input);
    assert_eq!(engine.sort(), &[-1, 0, 1, 1, 1, 1]);
}

#[test]
fn test_engine_reuse() {
    let mut engine = SortingEngine::new(6).unwrap();

    engine.read_array(&[4, 3, 2, 1, 0, -1, -2]);
    assert_eq!(engine.sort(), &[-2, -1, 0, 1, 2, 3, 4]);

    engine.read_array(&[2, 1]);
    assert_eq!(engine.sort(), &[1, 2]);
    assert_eq!(engine.stats().merges, 0);
    assert_eq!(engine.stats().direct_sorts, 1);
}

#[test]
fn test_invalid_memory_size() {
    assert_eq!(
        SortingEngine::new(2).unwrap_err(),
        SortError::MemoryTooSmall { memory_size: 2 }
    );
}
