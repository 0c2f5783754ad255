use std::cmp::Ordering;

use crate::ComparisonCounter;

sort_impl!("quicksort");

pub fn sort<T: Ord>(v: &mut [T]) {
    quicksort(v, &mut |a: &T, b: &T| a.lt(b));
}

pub fn sort_by<T, F: FnMut(&T, &T) -> Ordering>(v: &mut [T], mut compare: F) {
    quicksort(v, &mut |a: &T, b: &T| compare(a, b) == Ordering::Less);
}

/// Sorts `v` and adds every comparison made to `counter`.
pub fn sort_counted<T: Ord>(v: &mut [T], counter: &mut ComparisonCounter) {
    quicksort(v, &mut counter.is_less());
}

/// Sorts `v` recursively.
///
/// Only the shorter side of each partition is recursed into, the longer side is handled by the
/// loop. That caps the stack depth at log2(len) even though sorted input makes every partition
/// maximally unbalanced and the runtime *O*(*n*^2).
pub(crate) fn quicksort<'a, T, F>(mut v: &'a mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    while v.len() > 1 {
        let pivot_pos = partition(v, is_less);

        let (left, right) = v.split_at_mut(pivot_pos);
        let right = &mut right[1..];

        if left.len() < right.len() {
            quicksort(left, is_less);
            v = right;
        } else {
            quicksort(right, is_less);
            v = left;
        }
    }
}

/// Partitions `v` around its last element.
///
/// Afterwards every element left of the returned position is less than or equal to the pivot,
/// every element right of it is greater, and the pivot sits at the returned position. One
/// comparison per non-pivot element.
fn partition<T, F>(v: &mut [T], is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let pivot_pos = v.len() - 1;
    let mut store = 0;

    for i in 0..pivot_pos {
        if !is_less(&v[pivot_pos], &v[i]) {
            v.swap(store, i);
            store += 1;
        }
    }

    v.swap(store, pivot_pos);
    store
}
