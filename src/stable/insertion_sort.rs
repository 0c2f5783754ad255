use std::cmp::Ordering;

use crate::ComparisonCounter;

sort_impl!("insertion_sort");

pub fn sort<T: Ord>(v: &mut [T]) {
    insertion_sort(v, &mut |a: &T, b: &T| a.lt(b));
}

pub fn sort_by<T, F: FnMut(&T, &T) -> Ordering>(v: &mut [T], mut compare: F) {
    insertion_sort(v, &mut |a: &T, b: &T| compare(a, b) == Ordering::Less);
}

/// Sorts `v` and adds every comparison made to `counter`.
pub fn sort_counted<T: Ord>(v: &mut [T], counter: &mut ComparisonCounter) {
    insertion_sort(v, &mut counter.is_less());
}

/// Sorts `v` by growing a sorted prefix one element at a time.
///
/// Stable, *O*(*n*^2) worst-case, *n* - 1 comparisons on already sorted input.
pub(crate) fn insertion_sort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    for i in 1..v.len() {
        insert_tail(&mut v[..=i], is_less);
    }
}

/// Moves the last element of `v` left past every strictly greater predecessor, assuming
/// `v[..v.len() - 1]` is already sorted.
///
/// Every examined predecessor costs one comparison, the one that stops the shift included.
fn insert_tail<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let mut hole = v.len() - 1;
    while hole > 0 && is_less(&v[hole], &v[hole - 1]) {
        v.swap(hole, hole - 1);
        hole -= 1;
    }
}
