#![allow(dead_code)]

use std::cmp::Ordering;
use std::fmt::Debug;
use std::sync::Once;

use rand::rngs::StdRng;
use rand::Rng;

use hybrid_sort_lab::patterns;
use hybrid_sort_lab::Sort;

#[cfg(feature = "large_test_sizes")]
pub const TEST_SIZES: &[usize] = &[
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 15, 16, 17, 20, 24, 30, 32, 33, 35, 50, 64, 100, 200,
    500, 1_000, 2_048, 10_000, 100_000, 1_000_000,
];

#[cfg(not(feature = "large_test_sizes"))]
pub const TEST_SIZES: &[usize] = &[
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 15, 16, 17, 20, 24, 30, 32, 33, 35, 50, 64, 100, 200,
    500, 1_000, 2_048, 10_000,
];

/// Seeded generator for one test. The seed is printed once per test binary so failures can be
/// reproduced with `HYBRID_SORT_SEED`.
pub fn test_rng() -> StdRng {
    static SEED_WRITTEN: Once = Once::new();
    let seed = patterns::random_init_seed();
    SEED_WRITTEN.call_once(|| println!("Seed: {seed}"));
    patterns::seeded_rng(seed)
}

pub fn random(rng: &mut StdRng, len: usize) -> Vec<i32> {
    (0..len).map(|_| rng.gen()).collect()
}

/// Few distinct values, lots of duplicates.
pub fn random_d4(rng: &mut StdRng, len: usize) -> Vec<i32> {
    (0..len).map(|_| rng.gen_range(0..4)).collect()
}

pub fn ascending(_rng: &mut StdRng, len: usize) -> Vec<i32> {
    (0..len as i32).collect()
}

pub fn descending(_rng: &mut StdRng, len: usize) -> Vec<i32> {
    (0..len as i32).rev().collect()
}

pub fn all_equal(_rng: &mut StdRng, len: usize) -> Vec<i32> {
    vec![66; len]
}

/// Ascending runs of length 20 with random starting values.
pub fn saw_ascending(rng: &mut StdRng, len: usize) -> Vec<i32> {
    let mut v = random(rng, len);
    for chunk in v.chunks_mut(20) {
        chunk.sort();
    }
    v
}

/// Sorted with a handful of random elements swapped around.
pub fn nearly_sorted(rng: &mut StdRng, len: usize) -> Vec<i32> {
    let mut v = ascending(rng, len);
    if len >= 2 {
        for _ in 0..(len / 100).max(1) {
            let a = rng.gen_range(0..len);
            let b = rng.gen_range(0..len);
            v.swap(a, b);
        }
    }
    v
}

/// Sorts every pattern of every test size up to `max_len` and compares with the standard library.
pub fn sort_comp<S: Sort>(pattern_fn: fn(&mut StdRng, usize) -> Vec<i32>, max_len: usize) {
    let mut rng = test_rng();
    for &len in TEST_SIZES.iter().filter(|&&len| len <= max_len) {
        let original = pattern_fn(&mut rng, len);

        let mut expected = original.clone();
        expected.sort();

        let mut got = original.clone();
        S::sort(&mut got);

        assert_sorted_as(&original, &expected, &got, &S::name());
    }
}

pub fn sort_by_reverse<S: Sort>(max_len: usize) {
    let mut rng = test_rng();
    for &len in TEST_SIZES.iter().filter(|&&len| len <= max_len) {
        let original = random(&mut rng, len);

        let mut expected = original.clone();
        expected.sort_by(|a, b| b.cmp(a));

        let mut got = original.clone();
        S::sort_by(&mut got, |a, b| b.cmp(a));

        assert_sorted_as(&original, &expected, &got, &S::name());
    }
}

/// Equal keys have to keep their input order.
pub fn stability<S: Sort>(max_len: usize) {
    let mut rng = test_rng();
    for &len in TEST_SIZES.iter().filter(|&&len| len <= max_len) {
        let original: Vec<(i32, usize)> = (0..len).map(|i| (rng.gen_range(0..16), i)).collect();

        let mut expected = original.clone();
        expected.sort_by_key(|&(key, _)| key);

        let mut got = original.clone();
        S::sort_by(&mut got, |a, b| a.0.cmp(&b.0));

        assert_sorted_as(&original, &expected, &got, &S::name());
    }
}

pub fn sort_by_panic_free_on_partial_order<S: Sort>() {
    let mut rng = test_rng();
    let mut v = random(&mut rng, 500);
    // Not a total order, the result is unspecified but every element has to survive.
    S::sort_by(&mut v, |a, b| {
        if a % 7 == 0 || b % 7 == 0 {
            Ordering::Equal
        } else {
            a.cmp(b)
        }
    });
    assert_eq!(v.len(), 500);
}

pub fn is_sorted<T: Ord>(v: &[T]) -> bool {
    v.windows(2).all(|w| w[0] <= w[1])
}

fn assert_sorted_as<T: Debug + PartialEq>(original: &[T], expected: &[T], got: &[T], name: &str) {
    if expected != got {
        if original.len() <= 100 {
            eprintln!("Original: {original:?}");
            eprintln!("Expected: {expected:?}");
            eprintln!("Got:      {got:?}");
        }
        panic!("{name} failed for len {}", original.len());
    }
}

/// Declares one test per input pattern for a [`Sort`] implementation.
///
/// `$max_len` caps the input length for sorts that are quadratic on some patterns.
macro_rules! instantiate_sort_tests {
    ($prefix:ident, $sort:ty, $max_len:expr) => {
        paste::paste! {
            #[test]
            fn [<$prefix _random>]() {
                common::sort_comp::<$sort>(common::random, $max_len);
            }

            #[test]
            fn [<$prefix _random_d4>]() {
                common::sort_comp::<$sort>(common::random_d4, $max_len);
            }

            #[test]
            fn [<$prefix _ascending>]() {
                common::sort_comp::<$sort>(common::ascending, $max_len);
            }

            #[test]
            fn [<$prefix _descending>]() {
                common::sort_comp::<$sort>(common::descending, $max_len);
            }

            #[test]
            fn [<$prefix _all_equal>]() {
                common::sort_comp::<$sort>(common::all_equal, $max_len);
            }

            #[test]
            fn [<$prefix _saw_ascending>]() {
                common::sort_comp::<$sort>(common::saw_ascending, $max_len);
            }

            #[test]
            fn [<$prefix _nearly_sorted>]() {
                common::sort_comp::<$sort>(common::nearly_sorted, $max_len);
            }

            #[test]
            fn [<$prefix _sort_by_reverse>]() {
                common::sort_by_reverse::<$sort>($max_len);
            }

            #[test]
            fn [<$prefix _partial_order>]() {
                common::sort_by_panic_free_on_partial_order::<$sort>();
            }
        }
    };
    ($prefix:ident, $sort:ty, $max_len:expr, stable) => {
        instantiate_sort_tests!($prefix, $sort, $max_len);

        paste::paste! {
            #[test]
            fn [<$prefix _stability>]() {
                common::stability::<$sort>($max_len);
            }
        }
    };
}
