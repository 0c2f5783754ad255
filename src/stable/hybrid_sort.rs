//! Merge sort with an insertion sort cutoff.
//!
//! Slices longer than the threshold `S` are split in half, sorted recursively and merged. Slices of
//! at most `S` elements go to insertion sort instead. `S = 1` never reaches insertion sort and
//! performs exactly the comparisons of [`merge_sort`](super::merge_sort), `S >= len` performs
//! exactly the comparisons of [`insertion_sort`](super::insertion_sort).

use std::cmp::Ordering;
use std::num::NonZeroUsize;

use crate::stable::insertion_sort::insertion_sort;
use crate::stable::merge_sort::{merge, split_point};
use crate::{ComparisonCounter, Sort};

/// Cutoff used by [`sort`] and [`sort_by`].
pub const DEFAULT_THRESHOLD: usize = 10;

/// [`Sort`] implementation with a compile time threshold.
pub struct HybridSort<const S: usize>;

impl<const S: usize> HybridSort<S> {
    const THRESHOLD: NonZeroUsize = match NonZeroUsize::new(S) {
        Some(threshold) => threshold,
        None => panic!("hybrid sort threshold must be at least 1"),
    };
}

impl<const S: usize> Sort for HybridSort<S> {
    fn name() -> String {
        format!("hybrid_sort_s{S}")
    }

    fn sort<T>(arr: &mut [T])
    where
        T: Ord + Clone,
    {
        sort_with_threshold(arr, Self::THRESHOLD);
    }

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        sort_with_threshold_by(arr, Self::THRESHOLD, compare);
    }
}

pub type SortImpl = HybridSort<DEFAULT_THRESHOLD>;

pub fn sort<T: Ord + Clone>(v: &mut [T]) {
    SortImpl::sort(v);
}

pub fn sort_by<T: Clone, F: FnMut(&T, &T) -> Ordering>(v: &mut [T], compare: F) {
    SortImpl::sort_by(v, compare);
}

pub fn sort_with_threshold<T: Ord + Clone>(v: &mut [T], threshold: NonZeroUsize) {
    hybrid_sort_by(v, threshold, &mut |a: &T, b: &T| a.lt(b));
}

pub fn sort_with_threshold_by<T, F>(v: &mut [T], threshold: NonZeroUsize, mut compare: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    hybrid_sort_by(v, threshold, &mut |a: &T, b: &T| {
        compare(a, b) == Ordering::Less
    });
}

/// Sorts `v` and adds every comparison made to `counter`.
pub fn sort_counted<T: Ord + Clone>(
    v: &mut [T],
    threshold: NonZeroUsize,
    counter: &mut ComparisonCounter,
) {
    hybrid_sort_by(v, threshold, &mut counter.is_less());
}

/// Sorts the inclusive range `v[left..=right]` in place, leaving everything outside it untouched.
///
/// `left >= right` is a no-op. Panics if `right` is out of bounds.
pub fn hybrid_sort<T: Ord + Clone>(
    v: &mut [T],
    left: usize,
    right: usize,
    threshold: NonZeroUsize,
    counter: &mut ComparisonCounter,
) {
    if left >= right {
        return;
    }

    sort_counted(&mut v[left..=right], threshold, counter);
}

pub(crate) fn hybrid_sort_by<T, F>(v: &mut [T], threshold: NonZeroUsize, is_less: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    if v.len() < 2 {
        return;
    }

    // Insertion sort works in place, no need for scratch space.
    if v.len() <= threshold.get() {
        insertion_sort(v, is_less);
        return;
    }

    let mut buf = Vec::with_capacity(v.len());
    hybrid_sort_rec(v, threshold.get(), &mut buf, is_less);
}

fn hybrid_sort_rec<T, F>(v: &mut [T], threshold: usize, buf: &mut Vec<T>, is_less: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len < 2 {
        return;
    }

    if len <= threshold {
        insertion_sort(v, is_less);
        return;
    }

    let mid = split_point(len);
    hybrid_sort_rec(&mut v[..mid], threshold, buf, is_less);
    hybrid_sort_rec(&mut v[mid..], threshold, buf, is_less);
    merge(v, mid, buf, is_less);
}
