use std::cmp::Ordering;

use crate::ComparisonCounter;

sort_impl!("merge_sort");

pub fn sort<T: Ord + Clone>(v: &mut [T]) {
    merge_sort(v, &mut |a: &T, b: &T| a.lt(b));
}

pub fn sort_by<T: Clone, F: FnMut(&T, &T) -> Ordering>(v: &mut [T], mut compare: F) {
    merge_sort(v, &mut |a: &T, b: &T| compare(a, b) == Ordering::Less);
}

/// Sorts `v` and adds every comparison made to `counter`.
pub fn sort_counted<T: Ord + Clone>(v: &mut [T], counter: &mut ComparisonCounter) {
    merge_sort(v, &mut counter.is_less());
}

/// Top-down merge sort.
///
/// This sort is stable and *O*(*n* \* log(*n*)) worst-case. It allocates one scratch buffer the
/// size of `v` that every merge reuses.
pub(crate) fn merge_sort<T, F>(v: &mut [T], is_less: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    if v.len() < 2 {
        return;
    }

    let mut buf = Vec::with_capacity(v.len());
    merge_sort_rec(v, &mut buf, is_less);
}

fn merge_sort_rec<T, F>(v: &mut [T], buf: &mut Vec<T>, is_less: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len < 2 {
        return;
    }

    let mid = split_point(len);
    merge_sort_rec(&mut v[..mid], buf, is_less);
    merge_sort_rec(&mut v[mid..], buf, is_less);
    merge(v, mid, buf, is_less);
}

/// Length of the left half when splitting `len` elements, the left half takes the extra element
/// of an odd length.
#[inline]
pub(crate) fn split_point(len: usize) -> usize {
    len - len / 2
}

/// Merges the sorted runs `v[..mid]` and `v[mid..]` into one sorted run in `v`.
///
/// Both runs are copied into `buf` and interleaved back by repeatedly taking the lesser head, the
/// left one on ties. Only interleave steps compare; whatever remains after one run is exhausted is
/// moved without comparing.
pub(crate) fn merge<T, F>(v: &mut [T], mid: usize, buf: &mut Vec<T>, is_less: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    debug_assert!(mid > 0 && mid < v.len());

    buf.clear();
    buf.extend_from_slice(v);
    let (left, right) = buf.split_at(mid);

    let (mut i, mut j, mut out) = (0, 0, 0);
    while i < left.len() && j < right.len() {
        if is_less(&right[j], &left[i]) {
            v[out] = right[j].clone();
            j += 1;
        } else {
            v[out] = left[i].clone();
            i += 1;
        }
        out += 1;
    }

    // Leftover right elements are already in their final place.
    for elem in &left[i..] {
        v[out] = elem.clone();
        out += 1;
    }
}
