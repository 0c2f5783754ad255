// In-place Lomuto quicksort with the last element as pivot.
pub mod quicksort;
